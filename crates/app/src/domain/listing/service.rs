//! Listing service.
//!
//! Listing takes no pickup point locks. A page of receptions is read first, then the
//! pickup points and products it references are fetched concurrently. Writes committed
//! between those reads may or may not be reflected.

use std::{collections::HashSet, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tokio::time::timeout;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        listing::{
            data::{ListingQuery, MAX_PAGE_LIMIT, PickupPointListing},
            errors::ListingServiceError,
        },
        pickup_points::records::PickupPointUuid,
        receptions::records::ReceptionUuid,
        workflow::WorkflowSettings,
    },
    store::{ListingReader, StoreResultExt},
};

pub type PgListingService = ListingWorkflow<Db>;

pub struct ListingWorkflow<S> {
    store: Arc<S>,
    settings: WorkflowSettings,
}

impl<S> ListingWorkflow<S> {
    #[must_use]
    pub fn new(store: Arc<S>, settings: WorkflowSettings) -> Self {
        Self { store, settings }
    }
}

impl<S: ListingReader> ListingWorkflow<S> {
    async fn read_page(
        &self,
        query: ListingQuery,
    ) -> Result<PickupPointListing, ListingServiceError> {
        if query.is_past_end() {
            return Ok(PickupPointListing::default());
        }

        let receptions = self
            .store
            .search_receptions(query.range, query.offset(), query.limit)
            .await
            .context("search receptions")?;

        if receptions.is_empty() {
            return Ok(PickupPointListing::default());
        }

        let mut seen = HashSet::new();

        let pickup_point_uuids: Vec<PickupPointUuid> = receptions
            .iter()
            .map(|reception| reception.pickup_point_uuid)
            .filter(|uuid| seen.insert(*uuid))
            .collect();

        let reception_uuids: Vec<ReceptionUuid> =
            receptions.iter().map(|reception| reception.uuid).collect();

        let (pickup_points, products) = tokio::try_join!(
            async {
                self.store
                    .get_pickup_points(&pickup_point_uuids)
                    .await
                    .context("get pickup points")
            },
            async {
                self.store
                    .get_products(&reception_uuids)
                    .await
                    .context("get products")
            },
        )?;

        Ok(PickupPointListing {
            pickup_points,
            receptions,
            products,
        })
    }
}

#[async_trait]
impl<S: ListingReader + 'static> ListingService for ListingWorkflow<S> {
    #[tracing::instrument(skip(self))]
    async fn list_pickup_points(
        &self,
        query: ListingQuery,
    ) -> Result<PickupPointListing, ListingServiceError> {
        if query.page == 0 || query.limit == 0 || query.limit > MAX_PAGE_LIMIT {
            return Err(ListingServiceError::InvalidPage {
                page: query.page,
                limit: query.limit,
            });
        }

        let listing = timeout(self.settings.operation_timeout, self.read_page(query))
            .await
            .map_err(|_elapsed| ListingServiceError::DeadlineExceeded)??;

        debug!(
            receptions = listing.receptions.len(),
            pickup_points = listing.pickup_points.len(),
            products = listing.products.len(),
            "listing page read"
        );

        Ok(listing)
    }
}

#[automock]
#[async_trait]
pub trait ListingService: Send + Sync {
    /// Lists one page of receptions, ordered by opening time, together with their
    /// pickup points and products.
    async fn list_pickup_points(
        &self,
        query: ListingQuery,
    ) -> Result<PickupPointListing, ListingServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;

    use crate::{
        domain::{
            listing::data::OpenedAtRange,
            pickup_points::records::City,
            products::{ProductsService, records::ProductCategory},
            receptions::ReceptionsService,
        },
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn empty_store_returns_empty_listing() -> TestResult {
        let ctx = TestContext::new().await;

        let listing = ctx.listing.list_pickup_points(ListingQuery::default()).await?;

        assert!(listing.is_empty());
        assert!(listing.pickup_points.is_empty());
        assert!(listing.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_page_is_rejected() {
        let ctx = TestContext::new().await;

        for (page, limit) in [(0, 10), (1, 0), (1, MAX_PAGE_LIMIT + 1)] {
            let result = ctx
                .listing
                .list_pickup_points(ListingQuery {
                    page,
                    limit,
                    ..ListingQuery::default()
                })
                .await;

            assert!(
                matches!(result, Err(ListingServiceError::InvalidPage { .. })),
                "expected InvalidPage for page {page} limit {limit}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn page_beyond_any_offset_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let pickup_point = ctx.register(City::Moscow).await?;

        ctx.receptions.create_reception(pickup_point).await?;

        let listing = ctx
            .listing
            .list_pickup_points(ListingQuery {
                page: 1_000_000_000_000_000_000,
                limit: 10,
                ..ListingQuery::default()
            })
            .await?;

        assert!(listing.is_empty());
        assert!(listing.pickup_points.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn listing_returns_referenced_pickup_points_and_products() -> TestResult {
        let ctx = TestContext::new().await;
        let moscow = ctx.register(City::Moscow).await?;
        let kazan = ctx.register(City::Kazan).await?;

        let first = ctx.receptions.create_reception(moscow).await?;
        ctx.products
            .add_product(moscow, ProductCategory::Electronics)
            .await?;
        ctx.receptions.close_reception(moscow).await?;
        let second = ctx.receptions.create_reception(moscow).await?;
        let third = ctx.receptions.create_reception(kazan).await?;
        ctx.products.add_product(kazan, ProductCategory::Shoes).await?;
        ctx.products.add_product(kazan, ProductCategory::Shoes).await?;

        let listing = ctx.listing.list_pickup_points(ListingQuery::default()).await?;

        let receptions: Vec<ReceptionUuid> = listing.receptions.iter().map(|r| r.uuid).collect();
        let pickup_points: Vec<PickupPointUuid> =
            listing.pickup_points.iter().map(|p| p.uuid).collect();

        assert_eq!(receptions, vec![first.uuid, second.uuid, third.uuid]);
        assert_eq!(pickup_points.len(), 2, "pickup points are deduplicated");
        assert!(pickup_points.contains(&moscow));
        assert!(pickup_points.contains(&kazan));
        assert_eq!(listing.products.len(), 3);

        Ok(())
    }

    #[tokio::test]
    async fn pages_are_ordered_and_do_not_overlap() -> TestResult {
        let ctx = TestContext::new().await;
        let start = Timestamp::now().checked_sub(1.minute())?;

        let mut opened = Vec::new();

        for _ in 0..15 {
            let pickup_point = ctx.register(City::Moscow).await?;

            opened.push(ctx.receptions.create_reception(pickup_point).await?.uuid);
        }

        let range = OpenedAtRange {
            from: Some(start),
            to: Some(start.checked_add(24.hours())?),
        };

        let first_page = ctx
            .listing
            .list_pickup_points(ListingQuery {
                range,
                page: 1,
                limit: 10,
            })
            .await?;

        let second_page = ctx
            .listing
            .list_pickup_points(ListingQuery {
                range,
                page: 2,
                limit: 10,
            })
            .await?;

        let listed: Vec<ReceptionUuid> = first_page
            .receptions
            .iter()
            .chain(second_page.receptions.iter())
            .map(|reception| reception.uuid)
            .collect();

        assert_eq!(first_page.receptions.len(), 10);
        assert_eq!(second_page.receptions.len(), 5);
        assert_eq!(listed, opened, "pages must be ordered, gap-free and disjoint");

        Ok(())
    }

    #[tokio::test]
    async fn range_excludes_receptions_opened_outside_it() -> TestResult {
        let ctx = TestContext::new().await;
        let pickup_point = ctx.register(City::Moscow).await?;

        ctx.receptions.create_reception(pickup_point).await?;

        let tomorrow = Timestamp::now().checked_add(24.hours())?;

        let listing = ctx
            .listing
            .list_pickup_points(ListingQuery {
                range: OpenedAtRange {
                    from: Some(tomorrow),
                    to: None,
                },
                ..ListingQuery::default()
            })
            .await?;

        assert!(listing.is_empty());

        Ok(())
    }
}
