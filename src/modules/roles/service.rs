use anyhow::anyhow;
use rollgate_core::AppError;
use rollgate_db::RoleStore;
use rollgate_models::Role;
use tracing::{error, instrument};

pub struct RoleService;

impl RoleService {
    /// Looks up the role of the given type.
    ///
    /// A missing role is a deployment fault, not a client error: it is logged
    /// and reported as a configuration error.
    #[instrument(skip(roles))]
    pub async fn resolve_role(roles: &dyn RoleStore, role_type: &str) -> Result<Role, AppError> {
        match roles.find_by_type(role_type).await {
            Ok(Some(role)) => Ok(role),
            Ok(None) => {
                error!(
                    role_type,
                    "default role is missing; run `rollgate-cli seed-roles`"
                );
                Err(AppError::configuration(anyhow!(
                    "Impossible to find the default role"
                )))
            }
            Err(e) => Err(AppError::persistence(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rollgate_core::ErrorKind;
    use rollgate_db::StoreError;
    use rollgate_models::RoleId;

    struct FixedRoles(Option<Role>);

    #[async_trait]
    impl RoleStore for FixedRoles {
        async fn find_by_type(&self, role_type: &str) -> Result<Option<Role>, StoreError> {
            Ok(self.0.clone().filter(|r| r.role_type == role_type))
        }
    }

    struct BrokenRoles;

    #[async_trait]
    impl RoleStore for BrokenRoles {
        async fn find_by_type(&self, _role_type: &str) -> Result<Option<Role>, StoreError> {
            Err(StoreError::Backend("pool timed out".to_string()))
        }
    }

    fn student_role() -> Role {
        Role {
            id: RoleId::new(),
            name: "Student".to_string(),
            role_type: "student".to_string(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_resolves_existing_role() {
        let role = student_role();
        let store = FixedRoles(Some(role.clone()));

        let resolved = RoleService::resolve_role(&store, "student").await.unwrap();
        assert_eq!(resolved.id, role.id);
    }

    #[tokio::test]
    async fn test_missing_role_is_configuration_error() {
        let store = FixedRoles(Some(student_role()));

        let err = RoleService::resolve_role(&store, "authenticated")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConfigurationError);
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let err = RoleService::resolve_role(&BrokenRoles, "student")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::PersistenceError);
    }
}
