//! Immutable service registry.
//!
//! Registration is a one-time build phase: services are collected into a
//! builder, then folded into a single dispatch-ID-to-handle table that
//! is read-only for the whole serving phase. Collisions are rejected at
//! build time rather than resolved first-registered-wins at dispatch
//! time.

use crate::error::ServerError;
use crate::service::{RawHandle, Service};
use std::collections::HashMap;
use std::sync::Arc;

/// Collects services before the server starts.
#[derive(Default)]
pub struct RegistryBuilder {
    services: Vec<Arc<dyn Service>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a service to the registry under construction.
    pub fn register(mut self, service: Arc<dyn Service>) -> Self {
        tracing::info!(
            "Registered service {} (id {})",
            service.service_name(),
            service.service_id()
        );
        self.services.push(service);
        self
    }

    /// Builds the immutable registry, combining every service's routes
    /// into one dispatch table. Fails if two services route the same
    /// dispatch ID, or if a service enumerates an ID it cannot resolve.
    pub fn build(self) -> Result<Registry, ServerError> {
        let mut handles: HashMap<u32, RawHandle> = HashMap::new();
        let mut owners: HashMap<u32, String> = HashMap::new();

        for service in &self.services {
            for id in service.method_ids() {
                if let Some(first) = owners.get(&id) {
                    return Err(ServerError::DuplicateDispatchId {
                        id,
                        first: first.clone(),
                        second: service.service_name().to_string(),
                    });
                }
                let handle =
                    service
                        .method_handle(id)
                        .ok_or_else(|| ServerError::MissingHandle {
                            service: service.service_name().to_string(),
                            id,
                        })?;
                owners.insert(id, service.service_name().to_string());
                handles.insert(id, handle);
            }
        }

        Ok(Registry {
            services: self.services,
            handles,
        })
    }
}

/// An immutable dispatch table shared by every connection task. Built
/// once before serving starts; never mutated afterwards, so it needs no
/// locking.
pub struct Registry {
    services: Vec<Arc<dyn Service>>,
    handles: HashMap<u32, RawHandle>,
}

impl Registry {
    /// Resolves a dispatch ID to its method handle.
    pub fn resolve(&self, dispatch_id: u32) -> Option<RawHandle> {
        self.handles.get(&dispatch_id).cloned()
    }

    /// The registered services, in registration order.
    pub fn services(&self) -> &[Arc<dyn Service>] {
        &self.services
    }

    /// Number of routable methods across all services.
    pub fn method_count(&self) -> usize {
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::raw_handle;
    use bytes::Bytes;

    struct FixedService {
        name: &'static str,
        ids: Vec<u32>,
    }

    impl Service for FixedService {
        fn service_name(&self) -> &str {
            self.name
        }

        fn service_id(&self) -> u32 {
            wirecall_protocol::service_id(self.name)
        }

        fn method_ids(&self) -> Vec<u32> {
            self.ids.clone()
        }

        fn method_handle(&self, dispatch_id: u32) -> Option<RawHandle> {
            if self.ids.contains(&dispatch_id) {
                Some(raw_handle(|b: Bytes| async move { Ok(b) }))
            } else {
                None
            }
        }
    }

    #[test]
    fn test_build_and_resolve() {
        let registry = RegistryBuilder::new()
            .register(Arc::new(FixedService {
                name: "Alpha",
                ids: vec![10, 11],
            }))
            .register(Arc::new(FixedService {
                name: "Beta",
                ids: vec![20],
            }))
            .build()
            .unwrap();

        assert_eq!(registry.method_count(), 3);
        assert_eq!(registry.services().len(), 2);
        assert!(registry.resolve(10).is_some());
        assert!(registry.resolve(20).is_some());
        assert!(registry.resolve(99).is_none());
    }

    #[test]
    fn test_collision_rejected_at_build() {
        let result = RegistryBuilder::new()
            .register(Arc::new(FixedService {
                name: "Alpha",
                ids: vec![10],
            }))
            .register(Arc::new(FixedService {
                name: "Beta",
                ids: vec![10],
            }))
            .build();

        match result {
            Err(ServerError::DuplicateDispatchId { id, first, second }) => {
                assert_eq!(id, 10);
                assert_eq!(first, "Alpha");
                assert_eq!(second, "Beta");
            }
            other => panic!("expected DuplicateDispatchId, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert_eq!(registry.method_count(), 0);
        assert!(registry.resolve(0).is_none());
    }
}
