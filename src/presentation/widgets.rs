//! Reusable widgets shared by the screen components

pub mod form_field;
pub mod order_item;
pub mod product_item;

pub use form_field::FormField;
pub use order_item::OrderItem;
pub use product_item::ProductItem;
