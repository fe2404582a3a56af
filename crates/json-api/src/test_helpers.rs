//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use pvz_app::{
    context::AppContext,
    domain::{
        listing::MockListingService,
        pickup_points::{
            MockPickupPointsService,
            records::{City, PickupPointRecord, PickupPointUuid},
        },
        products::{
            MockProductsService,
            records::{ProductCategory, ProductRecord, ProductUuid},
        },
        receptions::{
            MockReceptionsService,
            records::{ReceptionRecord, ReceptionStatus, ReceptionUuid},
        },
    },
};

use crate::state::State;

pub(crate) const TEST_PICKUP_POINT_UUID: PickupPointUuid =
    PickupPointUuid::from_uuid(Uuid::from_u128(0x0195_0000_0000_7000_8000_0000_0000_0001));

pub(crate) const TEST_RECEPTION_UUID: ReceptionUuid =
    ReceptionUuid::from_uuid(Uuid::from_u128(0x0195_0000_0000_7000_8000_0000_0000_0002));

/// Service mocks for every domain. A mock without expectations fails the test if called.
#[derive(Default)]
pub(crate) struct MockApp {
    pub(crate) pickup_points: MockPickupPointsService,
    pub(crate) receptions: MockReceptionsService,
    pub(crate) products: MockProductsService,
    pub(crate) listing: MockListingService,
}

impl MockApp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_service(self, route: Router) -> Service {
        let app = AppContext {
            pickup_points: Arc::new(self.pickup_points),
            receptions: Arc::new(self.receptions),
            products: Arc::new(self.products),
            listing: Arc::new(self.listing),
        };

        Service::new(
            Router::new()
                .hoop(inject(State::shared(app)))
                .push(route),
        )
    }
}

pub(crate) fn make_pickup_point(uuid: PickupPointUuid, city: City) -> PickupPointRecord {
    PickupPointRecord {
        uuid,
        city,
        registered_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_reception(
    uuid: ReceptionUuid,
    pickup_point: PickupPointUuid,
    status: ReceptionStatus,
) -> ReceptionRecord {
    ReceptionRecord {
        uuid,
        pickup_point_uuid: pickup_point,
        status,
        opened_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(reception: ReceptionUuid, category: ProductCategory) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        reception_uuid: reception,
        category,
        added_at: Timestamp::UNIX_EPOCH,
    }
}
