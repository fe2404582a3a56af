//! App Router

use salvo::Router;

use crate::{pickup_points, products, receptions};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("pvz")
                .get(pickup_points::index::handler)
                .post(pickup_points::create::handler)
                .push(
                    Router::with_path("{pvz_id}")
                        .push(
                            Router::with_path("close_last_reception")
                                .post(receptions::close::handler),
                        )
                        .push(
                            Router::with_path("delete_last_product")
                                .post(products::delete_last::handler),
                        ),
                ),
        )
        .push(Router::with_path("receptions").post(receptions::create::handler))
        .push(Router::with_path("products").post(products::create::handler))
}
