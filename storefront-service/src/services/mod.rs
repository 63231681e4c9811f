pub mod gateway;
pub mod metrics;
pub mod pricing;
pub mod seed;
pub mod store;

pub use gateway::{DocumentGateway, Filter, GatewayError, PublicDocument, Record};
pub use metrics::{get_metrics, init_metrics, record_order_created, record_product_created};
pub use pricing::{calculate_totals, OrderTotals, PricingError};
pub use seed::{demo_products, seed_products, SeedOutcome};
pub use store::{DocumentStore, InMemoryStore, MongoStore};
