//! Macro-generated test suite for `DataService<Category>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<Category>` implementation against the full contract: key
//! assignment, CRUD, business-id uniqueness and the not-found cases.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use category_desk::storage::InMemoryDataService;
//!
//! data_service_tests!(InMemoryDataService::<Category>::new());
//! ```

/// Generate a full `DataService<Category>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `DataService<Category>`. It is re-evaluated for each test to ensure
/// isolation; async factories are written as `async_expr.await`.
#[macro_export]
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use category_desk::core::entity::Entity;
            use category_desk::core::error::EntityError;
            use category_desk::core::service::DataService;

            // ==================================================================
            // CRUD — Create & Get
            // ==================================================================

            #[tokio::test]
            async fn test_create_assigns_key() {
                let service = $factory;
                let created = service
                    .create(create_full_category("CAT-001", "Nike", "Shoes", "M", 0.8, "kg"))
                    .await
                    .unwrap();

                let key = created.key().expect("create should assign a key");
                assert_eq!(created.category_id, "CAT-001");

                let retrieved = service.get(key).await.unwrap();
                assert!(retrieved.is_some(), "Record should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.id, Some(key));
                assert_eq!(retrieved.brand, "Nike");
                assert_eq!(retrieved.kind, "Shoes");
                assert_eq!(retrieved.size, "M");
                assert!((retrieved.weight - 0.8).abs() < f64::EPSILON);
                assert_eq!(retrieved.unit, "kg");
            }

            #[tokio::test]
            async fn test_keys_are_distinct() {
                let service = $factory;
                let a = service.create(create_test_category("CAT-001", "Nike")).await.unwrap();
                let b = service.create(create_test_category("CAT-002", "Puma")).await.unwrap();
                assert_ne!(a.key(), b.key());
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                let result = service.get(987_654).await.unwrap();
                assert!(result.is_none(), "Getting a nonexistent key should return None");
            }

            // ==================================================================
            // CRUD — List
            // ==================================================================

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;
                let all = service.list().await.unwrap();
                assert!(all.is_empty(), "List on empty store should return empty vec");
            }

            #[tokio::test]
            async fn test_list_multiple() {
                let service = $factory;
                for record in sample_batch(5) {
                    service.create(record).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_eq!(all.len(), 5, "List should return all 5 created records");
                for i in 0..5 {
                    let code = format!("CAT-{:03}", i);
                    assert_eq!(
                        all.iter().filter(|c| c.category_id == code).count(),
                        1,
                        "{} should be listed exactly once",
                        code
                    );
                }
                assert!(all.iter().all(|c| c.key().is_some()));
            }

            // ==================================================================
            // Uniqueness
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_business_id() {
                let service = $factory;
                service.create(create_test_category("CAT-001", "Nike")).await.unwrap();

                let err = service
                    .create(create_test_category("CAT-001", "Adidas"))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<EntityError>(),
                    Some(EntityError::AlreadyExists { .. })
                ));

                let all = service.list().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].brand, "Nike");
            }

            // ==================================================================
            // CRUD — Update
            // ==================================================================

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let created = service
                    .create(create_test_category("CAT-042", "Nike"))
                    .await
                    .unwrap();
                let key = created.key().unwrap();

                let mut changed = created.clone();
                changed.brand = "Puma".to_string();
                changed.weight = 2.5;

                let updated = service.update(key, changed).await.unwrap();
                assert_eq!(updated.id, Some(key));
                assert_eq!(updated.brand, "Puma");

                let all = service.list().await.unwrap();
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].id, Some(key));
                assert_eq!(all[0].brand, "Puma");
                assert_eq!(all[0].category_id, "CAT-042");
                assert!((all[0].weight - 2.5).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let result = service
                    .update(987_654, create_test_category("CAT-001", "Ghost"))
                    .await;
                let err = result.unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<EntityError>(),
                    Some(EntityError::NotFound { key: 987_654, .. })
                ));
            }

            // ==================================================================
            // CRUD — Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let created = service
                    .create(create_test_category("CAT-007", "Reebok"))
                    .await
                    .unwrap();
                let key = created.key().unwrap();

                service.delete(key).await.unwrap();

                assert!(service.get(key).await.unwrap().is_none());
                assert!(
                    service
                        .list()
                        .await
                        .unwrap()
                        .iter()
                        .all(|c| c.category_id != "CAT-007"),
                    "Deleted record should not be listed"
                );
            }

            /// Deleting an absent key is an error on every backend.
            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                service.create(create_test_category("CAT-001", "Nike")).await.unwrap();

                let err = service.delete(987_654).await.unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<EntityError>(),
                    Some(EntityError::NotFound { .. })
                ));
                assert_eq!(service.list().await.unwrap().len(), 1);
            }

            #[tokio::test]
            async fn test_business_id_reusable_after_delete() {
                let service = $factory;
                let created = service
                    .create(create_test_category("CAT-001", "Nike"))
                    .await
                    .unwrap();
                service.delete(created.key().unwrap()).await.unwrap();

                let again = service
                    .create(create_test_category("CAT-001", "Puma"))
                    .await
                    .unwrap();
                assert_ne!(again.key(), created.key());
            }
        }
    };
}
