//! # Burgerhouse
//!
//! Automates a repeat order on the Pizzaria Burgerhouse website: log in,
//! reorder the most recent order, run the two-phase checkout, then poll until
//! the shop accepts and count down to pickup.
//!
//! ## Usage
//!
//! ```bash
//! burgerhouse <username> --password-file ~/.cache/pizza
//! ```
//!
//! ## Modules
//!
//! - `client` - HTTP session bound to the site (login, reorder, checkout, status polling)
//! - `config` - Checkout delivery profile, optionally loaded from TOML
//! - `error` - Error taxonomy shared by parsers, extractors and the client
//! - `extract` - HTML extractors mapping fixed page shapes to typed records
//! - `order` - Order, CartItem and PendingOrder records
//! - `parse` - Scalar field parsing (integers, DKK prices, timestamps)
//! - `workflow` - End-to-end reorder-and-wait orchestration

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod order;
pub mod parse;
pub mod workflow;
