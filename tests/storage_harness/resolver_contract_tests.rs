//! Macro-generated test suite for `AdvocateStore` contract validation.
//!
//! The `advocate_store_tests!` macro seeds a store with
//! [`fixture_advocates`](super::fixture_advocates) and drives it through a
//! [`QueryResolver`](directory::core::QueryResolver), so every backend is
//! checked against the same filtering, ordering and pagination results.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! advocate_store_tests!(InMemoryAdvocateStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Pagination
//! - `test_default_first_page`: no parameters gives page 1 of size 10
//! - `test_second_page_window`: page 2, size 5 is ids 6..=10
//! - `test_last_partial_page`: page 3, size 5 holds the remaining two
//! - `test_page_past_end_is_empty`: empty page, total still reported
//! - `test_pages_partition_sorted_results`: concatenated pages equal the full order
//!
//! ## Filtering
//! - `test_query_matches_names`, `test_query_matches_city`
//! - `test_query_is_case_insensitive`, `test_query_is_trimmed`
//! - `test_like_wildcards_are_literal`
//! - `test_specialties_excluded_by_default`, `test_specialties_included_when_enabled`
//!
//! ## Sorting
//! - `test_sort_years_desc_breaks_ties_by_id`, `test_sort_degree_asc`
//! - `test_sort_last_name_first_page`, `test_sort_first_name_desc`
//! - `test_direction_ignored_without_field`
//!
//! ## Validation and policy
//! - `test_invalid_sort_field_rejected`, `test_invalid_sort_direction_rejected`
//! - `test_out_of_range_values_substituted`, `test_reject_policy`
//!
//! ## Consistency
//! - `test_repeated_request_is_identical`, `test_independent_reads_agree`
//! - `test_empty_store`

/// Generate a full `AdvocateStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `SeedableStore`. It is re-evaluated for each test to ensure
/// isolation, and may contain `.await`.
#[macro_export]
macro_rules! advocate_store_tests {
    ($factory:expr) => {
        mod advocate_store_contract_tests {
            use super::*;
            use directory::config::{ConsistencyPolicy, PageSizePolicy, ResolverConfig};
            use directory::core::{
                DirectoryError, QueryParams, QueryResolver, ResponseAssembler, ValidationError,
            };

            async fn seeded_resolver(config: ResolverConfig) -> QueryResolver {
                let store = $factory;
                seed_fixture(&store).await.expect("Failed to seed fixture");
                resolver_over(store, config)
            }

            async fn default_resolver() -> QueryResolver {
                seeded_resolver(ResolverConfig::default()).await
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_default_first_page() {
                let resolver = default_resolver().await;
                let result = resolver.resolve(&QueryParams::new()).await.unwrap();

                assert_eq!(ids(&result), (1..=10).collect::<Vec<i64>>());
                assert_eq!(result.total_count, 12);
                assert_eq!(result.page, 1);
                assert_eq!(result.page_size, 10);

                let meta = result.pagination();
                assert_eq!(meta.total_pages, 2);
                assert!(meta.has_next);
                assert!(!meta.has_prev);
            }

            #[tokio::test]
            async fn test_second_page_window() {
                let resolver = default_resolver().await;
                let params = QueryParams::new().with_page(2).with_page_size(5);
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![6, 7, 8, 9, 10]);
                assert_eq!(result.total_count, 12);
            }

            #[tokio::test]
            async fn test_last_partial_page() {
                let resolver = default_resolver().await;
                let params = QueryParams::new().with_page(3).with_page_size(5);
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![11, 12]);
                let meta = result.pagination();
                assert!(!meta.has_next);
                assert!(meta.has_prev);
            }

            #[tokio::test]
            async fn test_page_past_end_is_empty() {
                let resolver = default_resolver().await;
                let params = QueryParams::new().with_page(10).with_page_size(5);
                let result = resolver.resolve(&params).await.unwrap();

                assert!(result.items.is_empty());
                assert_eq!(result.total_count, 12);
                assert_eq!(result.page, 10);
                assert_eq!(result.pagination().total_pages, 3);
            }

            #[tokio::test]
            async fn test_pages_partition_sorted_results() {
                let resolver = default_resolver().await;
                let full = resolver
                    .resolve(
                        &QueryParams::new()
                            .with_page_size(12)
                            .with_sort("yearsOfExperience", "desc"),
                    )
                    .await
                    .unwrap();

                let mut paged = Vec::new();
                for page in 1..=3 {
                    let params = QueryParams::new()
                        .with_page(page)
                        .with_page_size(5)
                        .with_sort("yearsOfExperience", "desc");
                    paged.extend(ids(&resolver.resolve(&params).await.unwrap()));
                }

                assert_eq!(paged, ids(&full));
            }

            // ==================================================================
            // Filtering
            // ==================================================================

            #[tokio::test]
            async fn test_query_matches_names() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("anne"))
                    .await
                    .unwrap();

                assert_eq!(ids(&result), vec![9, 11]);
                assert_eq!(result.total_count, 2);
            }

            #[tokio::test]
            async fn test_query_matches_city() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("san"))
                    .await
                    .unwrap();

                assert_eq!(ids(&result), vec![7, 8, 10]);
            }

            #[tokio::test]
            async fn test_query_is_case_insensitive() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("NEW YORK"))
                    .await
                    .unwrap();

                assert_eq!(ids(&result), vec![1]);
            }

            #[tokio::test]
            async fn test_query_is_trimmed() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("  anne  "))
                    .await
                    .unwrap();
                assert_eq!(result.total_count, 2);

                let blank = resolver
                    .resolve(&QueryParams::new().with_query("   "))
                    .await
                    .unwrap();
                assert_eq!(blank.total_count, 12);
            }

            #[tokio::test]
            async fn test_like_wildcards_are_literal() {
                let resolver = default_resolver().await;
                for needle in ["%", "_", "\\"] {
                    let result = resolver
                        .resolve(&QueryParams::new().with_query(needle))
                        .await
                        .unwrap();
                    assert_eq!(result.total_count, 0, "query {:?}", needle);
                    assert!(result.items.is_empty());
                }
            }

            #[tokio::test]
            async fn test_combined_filter_sort_and_page() {
                let resolver = default_resolver().await;
                let params = QueryParams::new()
                    .with_query("an")
                    .with_sort("yearsOfExperience", "asc")
                    .with_page(2)
                    .with_page_size(4);
                let result = resolver.resolve(&params).await.unwrap();

                // "an" matches 2, 7, 8, 9, 10, 11; by years: 9, 11, 10, 2, 7, 8
                assert_eq!(ids(&result), vec![7, 8]);
                assert_eq!(result.total_count, 6);
                assert!(!result.pagination().has_next);
            }

            #[tokio::test]
            async fn test_specialties_excluded_by_default() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("trauma"))
                    .await
                    .unwrap();

                assert_eq!(result.total_count, 0);
            }

            #[tokio::test]
            async fn test_specialties_included_when_enabled() {
                let config = ResolverConfig {
                    search_specialties: true,
                    ..ResolverConfig::default()
                };
                let resolver = seeded_resolver(config).await;
                let result = resolver
                    .resolve(&QueryParams::new().with_query("trauma"))
                    .await
                    .unwrap();

                assert_eq!(ids(&result), vec![2]);
            }

            // ==================================================================
            // Sorting
            // ==================================================================

            #[tokio::test]
            async fn test_sort_years_desc_breaks_ties_by_id() {
                let resolver = default_resolver().await;
                let params = QueryParams::new()
                    .with_page_size(12)
                    .with_sort("yearsOfExperience", "desc");
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![6, 8, 4, 1, 7, 2, 5, 10, 3, 11, 9, 12]);
            }

            #[tokio::test]
            async fn test_sort_degree_asc() {
                let resolver = default_resolver().await;
                let params = QueryParams::new()
                    .with_page_size(12)
                    .with_sort_field("degree");
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![1, 4, 7, 10, 3, 6, 9, 12, 2, 5, 8, 11]);
            }

            #[tokio::test]
            async fn test_sort_last_name_first_page() {
                let resolver = default_resolver().await;
                let params = QueryParams::new()
                    .with_page_size(3)
                    .with_sort("lastName", "ascending");
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![4, 9, 5]);
                assert_eq!(result.total_count, 12);
            }

            #[tokio::test]
            async fn test_sort_first_name_desc() {
                let resolver = default_resolver().await;
                let params = QueryParams::new()
                    .with_page_size(3)
                    .with_sort("firstName", "DESC");
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![12, 4, 1]);
            }

            #[tokio::test]
            async fn test_direction_ignored_without_field() {
                let resolver = default_resolver().await;
                let params = QueryParams {
                    sort_direction: Some("desc".to_string()),
                    ..QueryParams::default()
                };
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), (1..=10).collect::<Vec<i64>>());
            }

            // ==================================================================
            // Validation and policy
            // ==================================================================

            #[tokio::test]
            async fn test_invalid_sort_field_rejected() {
                let resolver = default_resolver().await;
                let err = resolver
                    .resolve(&QueryParams::new().with_sort_field("phoneNumber"))
                    .await
                    .unwrap_err();

                assert!(matches!(
                    err,
                    DirectoryError::Validation(ValidationError::InvalidSortField { ref value })
                        if value == "phoneNumber"
                ));
            }

            #[tokio::test]
            async fn test_invalid_sort_direction_rejected() {
                let resolver = default_resolver().await;
                let err = resolver
                    .resolve(&QueryParams::new().with_sort("lastName", "sideways"))
                    .await
                    .unwrap_err();

                assert!(matches!(
                    err,
                    DirectoryError::Validation(ValidationError::InvalidSortDirection { .. })
                ));
            }

            #[tokio::test]
            async fn test_out_of_range_values_substituted() {
                let resolver = default_resolver().await;
                for (page, page_size) in [(0, 500), (-3, 0), (1, -1), (1, 51)] {
                    let params = QueryParams::new()
                        .with_page(page)
                        .with_page_size(page_size);
                    let result = resolver.resolve(&params).await.unwrap();
                    assert_eq!(result.page, 1);
                    assert_eq!(result.page_size, 10);
                    assert_eq!(ids(&result), (1..=10).collect::<Vec<i64>>());
                }

                let at_max = resolver
                    .resolve(&QueryParams::new().with_page_size(50))
                    .await
                    .unwrap();
                assert_eq!(at_max.page_size, 50);
                assert_eq!(at_max.items.len(), 12);
            }

            #[tokio::test]
            async fn test_reject_policy() {
                let config = ResolverConfig {
                    page_size_policy: PageSizePolicy::Reject,
                    ..ResolverConfig::default()
                };
                let resolver = seeded_resolver(config).await;

                let err = resolver
                    .resolve(&QueryParams::new().with_page_size(51))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    DirectoryError::Validation(ValidationError::InvalidPageSize { value: 51, max: 50 })
                ));

                let err = resolver
                    .resolve(&QueryParams::new().with_page(0))
                    .await
                    .unwrap_err();
                assert!(matches!(
                    err,
                    DirectoryError::Validation(ValidationError::InvalidPage { value: 0 })
                ));
            }

            // ==================================================================
            // Consistency
            // ==================================================================

            #[tokio::test]
            async fn test_repeated_request_is_identical() {
                let resolver = default_resolver().await;
                let params = QueryParams::new().with_query("a").with_page_size(4);

                let first = resolver.resolve(&params).await.unwrap();
                let second = resolver.resolve(&params).await.unwrap();
                assert_eq!(first, second);
            }

            #[tokio::test]
            async fn test_independent_reads_agree() {
                let config = ResolverConfig {
                    consistency: ConsistencyPolicy::Independent,
                    ..ResolverConfig::default()
                };
                let resolver = seeded_resolver(config).await;
                let params = QueryParams::new()
                    .with_query("san")
                    .with_sort("city", "desc");
                let result = resolver.resolve(&params).await.unwrap();

                assert_eq!(ids(&result), vec![10, 8, 7]);
                assert_eq!(result.total_count, 3);
            }

            #[tokio::test]
            async fn test_fixture_assembles_without_warnings() {
                let resolver = default_resolver().await;
                let result = resolver
                    .resolve(&QueryParams::new().with_page_size(12))
                    .await
                    .unwrap();

                let response = ResponseAssembler.assemble(result).unwrap();
                assert_eq!(response.items.len(), 12);
                assert!(response.warnings.is_empty());
            }

            #[tokio::test]
            async fn test_empty_store() {
                let resolver = resolver_over($factory, ResolverConfig::default());
                let result = resolver.resolve(&QueryParams::new()).await.unwrap();

                assert!(result.items.is_empty());
                assert_eq!(result.total_count, 0);
                assert_eq!(result.pagination().total_pages, 0);
                assert!(!result.pagination().has_next);
            }
        }
    };
}
