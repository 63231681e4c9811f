pub mod id;
pub mod order;
pub mod product;

pub use id::{is_valid_document_id, validate_document_id, DocumentId, InvalidDocumentId};
pub use order::{Order, OrderItem, OrderStatus, ORDER_COLLECTION};
pub use product::{Product, PRODUCT_COLLECTION};
