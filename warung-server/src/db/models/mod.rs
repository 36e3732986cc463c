//! Database Models

// Location
pub mod dining_table;

// Menu
pub mod menu_item;

// Orders
pub mod order;

// Re-exports
pub use dining_table::{DiningTable, DiningTableCreate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{OrderDetail, OrderDraft, OrderItemDetail, OrderItemDraft};
