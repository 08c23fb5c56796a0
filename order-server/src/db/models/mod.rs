//! Database Models

// Serde helpers
pub mod serde_thing;

// Catalog
pub mod customer;
pub mod product;

// Orders & billing
pub mod invoice;
pub mod order;

// Storefront content
pub mod contact_message;
pub mod faq;
pub mod feedback;
pub mod gallery_image;

// Re-exports
pub use contact_message::{ContactMessage, ContactMessageCreate, ReadFlagRequest};
pub use customer::{Address, Customer, CustomerCreate, CustomerUpdate};
pub use faq::{Faq, FaqCreate, FaqUpdate};
pub use feedback::{Feedback, FeedbackCreate, FeedbackUpdate, ReplyRequest};
pub use gallery_image::{GalleryCategory, GalleryImage, GalleryImageCreate, GalleryImageUpdate};
pub use invoice::{
    Invoice, InvoiceCreate, InvoiceItem, InvoiceStatus, InvoiceUpdate, PaymentMethod,
};
pub use order::{
    Order, OrderCreate, OrderItem, OrderItemRequest, OrderStatus, OrderUpdate, PaymentStatus,
};
pub use product::{Dimensions, Product, ProductCategory, ProductCreate, ProductUpdate};
