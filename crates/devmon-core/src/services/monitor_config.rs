//! Monitor configuration service backed by a repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{DeviceMonitorView, MonitorConfigUpdate, NewDeviceMonitor};
use crate::ports::{CoreError, DeviceMonitorRepository, DeviceMonitorService, RepositoryError};
use crate::utils::validation::positive_id;

/// Repository-backed [`DeviceMonitorService`].
///
/// Status values are stored and returned as-is; nothing here derives or
/// transitions them.
pub struct MonitorConfigService {
    repo: Arc<dyn DeviceMonitorRepository>,
}

impl MonitorConfigService {
    pub fn new(repo: Arc<dyn DeviceMonitorRepository>) -> Self {
        Self { repo }
    }

    /// Register a monitor configuration for a newly onboarded device.
    pub async fn register(
        &self,
        device_id: i64,
        device_name: Option<String>,
    ) -> Result<DeviceMonitorView, CoreError> {
        let device_id = positive_id(Some(device_id), "deviceId")?;
        let monitor = self
            .repo
            .insert(NewDeviceMonitor {
                device_id,
                device_name,
            })
            .await?;

        tracing::info!(
            target: "devmon.monitor",
            id = monitor.id,
            device_id,
            "monitor config registered"
        );
        Ok(monitor.to_view())
    }

    /// Return the live configuration of a device, registering one first if
    /// the device has none yet.
    ///
    /// A device can own many device list records but only one monitor
    /// configuration, so repeated calls resolve to the same row.
    pub async fn ensure_registered(
        &self,
        device_id: i64,
        device_name: Option<String>,
    ) -> Result<DeviceMonitorView, CoreError> {
        let device_id = positive_id(Some(device_id), "deviceId")?;
        match self.repo.get_by_device_id(device_id).await {
            Ok(existing) => Ok(existing.to_view()),
            Err(RepositoryError::NotFound(_)) => {
                match self.register(device_id, device_name).await {
                    // Lost a race with a concurrent onboarding of the same device.
                    Err(CoreError::Repository(RepositoryError::AlreadyExists(_))) => {
                        Ok(self.repo.get_by_device_id(device_id).await?.to_view())
                    }
                    other => other,
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DeviceMonitorService for MonitorConfigService {
    async fn get_monitor_config(&self, device_id: i64) -> Result<DeviceMonitorView, CoreError> {
        let monitor = self.repo.get_by_device_id(device_id).await?;
        Ok(monitor.to_view())
    }

    async fn update_monitor_config(
        &self,
        update: MonitorConfigUpdate,
    ) -> Result<DeviceMonitorView, CoreError> {
        let monitor = self.repo.update_endpoint(&update).await?;
        tracing::debug!(
            target: "devmon.monitor",
            id = monitor.id,
            device_id = monitor.device_id,
            url = ?monitor.url,
            "monitor config updated"
        );
        Ok(monitor.to_view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeletedFlag, DeviceMonitor};
    use crate::ports::device_monitor_repository::MockDeviceMonitorRepository;
    use chrono::Utc;

    fn monitor(id: i64, device_id: i64, status: i32) -> DeviceMonitor {
        DeviceMonitor {
            id,
            device_id,
            device_name: Some(format!("device-{device_id}")),
            status,
            url: Some("http://example.com/agent".to_string()),
            access_token: Some("tok123".to_string()),
            deleted: DeletedFlag::Active,
            create_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_returns_view_of_device_config() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_get_by_device_id()
            .withf(|device_id| *device_id == 42)
            .times(1)
            .returning(|device_id| Ok(monitor(7, device_id, 3)));

        let service = MonitorConfigService::new(Arc::new(repo));
        let view = service.get_monitor_config(42).await.unwrap();

        assert_eq!(view.id, 7);
        assert_eq!(view.status, 3);
        assert_eq!(view.device_name.as_deref(), Some("device-42"));
    }

    #[tokio::test]
    async fn test_get_propagates_repository_error() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_get_by_device_id()
            .returning(|id| Err(RepositoryError::NotFound(format!("device {id}"))));

        let service = MonitorConfigService::new(Arc::new(repo));
        let err = service.get_monitor_config(99).await.unwrap_err();

        assert!(matches!(
            err,
            CoreError::Repository(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_writes_endpoint_and_keeps_status() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_update_endpoint()
            .withf(|u| u.id == 1 && u.url == "http://new/agent" && u.access_token == "t2")
            .times(1)
            .returning(|u| {
                let mut m = monitor(u.id, 5, 4);
                m.url = Some(u.url.clone());
                m.access_token = Some(u.access_token.clone());
                Ok(m)
            });

        let service = MonitorConfigService::new(Arc::new(repo));
        let view = service
            .update_monitor_config(MonitorConfigUpdate {
                id: 1,
                device_id: None,
                device_name: None,
                url: "http://new/agent".to_string(),
                access_token: "t2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(view.url.as_deref(), Some("http://new/agent"));
        assert_eq!(view.status, 4);
    }

    #[tokio::test]
    async fn test_register_rejects_non_positive_device_id() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_insert().never();

        let service = MonitorConfigService::new(Arc::new(repo));
        let err = service.register(0, None).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_inserts_config() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_insert()
            .withf(|m| m.device_id == 3 && m.device_name.as_deref() == Some("edge-03"))
            .times(1)
            .returning(|m| Ok(monitor(11, m.device_id, 1)));

        let service = MonitorConfigService::new(Arc::new(repo));
        let view = service
            .register(3, Some("edge-03".to_string()))
            .await
            .unwrap();
        assert_eq!(view.id, 11);
        assert_eq!(view.status, 1);
    }

    #[tokio::test]
    async fn test_ensure_registered_reuses_existing_config() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_get_by_device_id()
            .withf(|device_id| *device_id == 8)
            .times(1)
            .returning(|device_id| Ok(monitor(21, device_id, 4)));
        repo.expect_insert().never();

        let service = MonitorConfigService::new(Arc::new(repo));
        let view = service.ensure_registered(8, None).await.unwrap();
        assert_eq!(view.id, 21);
        assert_eq!(view.status, 4);
    }

    #[tokio::test]
    async fn test_ensure_registered_inserts_when_missing() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_get_by_device_id()
            .times(1)
            .returning(|id| Err(RepositoryError::NotFound(format!("device {id}"))));
        repo.expect_insert()
            .withf(|m| m.device_id == 8)
            .times(1)
            .returning(|m| Ok(monitor(22, m.device_id, 1)));

        let service = MonitorConfigService::new(Arc::new(repo));
        let view = service.ensure_registered(8, None).await.unwrap();
        assert_eq!(view.id, 22);
        assert_eq!(view.status, 1);
    }

    #[tokio::test]
    async fn test_ensure_registered_propagates_storage_errors() {
        let mut repo = MockDeviceMonitorRepository::new();
        repo.expect_get_by_device_id()
            .returning(|_| Err(RepositoryError::Storage("locked".to_string())));
        repo.expect_insert().never();

        let service = MonitorConfigService::new(Arc::new(repo));
        let err = service.ensure_registered(8, None).await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Repository(RepositoryError::Storage(_))
        ));
    }
}
