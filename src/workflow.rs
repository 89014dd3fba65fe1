//! End-to-end reorder-and-wait orchestration.
//!
//! One strictly sequential flow: authenticate, reorder the most recent order,
//! sanity-check the cart, run both checkout phases, then poll until the shop
//! accepts and count down to the pickup deadline. Every failure surfaces
//! as-is; nothing here retries except the acceptance poll, which only loops
//! while the delivery time is absent.

use crate::client::Session;
use crate::config::CheckoutProfile;
use crate::error::{Error, Result};
use crate::order::PendingOrder;
use crate::parse::parse_int;
use chrono::{DateTime, Local, NaiveTime, TimeZone};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

pub struct Workflow {
    session: Session,
    profile: CheckoutProfile,
    poll_interval: Duration,
}

impl Workflow {
    pub fn new(session: Session, profile: CheckoutProfile, poll_interval: Duration) -> Self {
        Self {
            session,
            profile,
            poll_interval,
        }
    }

    /// Reorder the most recent order and block until pickup time.
    pub async fn run(&self, username: &str, password: &str) -> Result<()> {
        self.session.login(username, password).await?;
        info!("logged in as {username}");

        let orders = self.session.list_recent_orders().await?;
        let last = orders
            .first()
            .ok_or_else(|| Error::NotFound("order history is empty".to_string()))?;
        info!(order_id = last.id, "reordering most recent order");
        self.session.reorder(last).await?;

        let item = self.session.check_cart().await?;
        println!(
            "In cart: {} x{} ({:.2} DKK)",
            item.product, item.quantity, item.price
        );

        self.session.checkout_start(&self.profile).await?;
        self.session.checkout_finalize().await?;
        let pending = self.session.fetch_pending_order().await?;
        info!(order_id = pending.id, "order placed");

        let deadline = self.await_acceptance(&pending).await?;
        self.countdown(deadline).await;
        Ok(())
    }

    /// Poll until the shop accepts the order, then derive the pickup
    /// deadline from the delivery time it reports.
    async fn await_acceptance(&self, pending: &PendingOrder) -> Result<DateTime<Local>> {
        println!("Waiting for the restaurant to accept the order");
        loop {
            let status = self.session.poll_status(pending).await?;
            if let Some(hhmm) = delivery_time(&status) {
                info!(delivery_time = hhmm, "order accepted");
                return pickup_deadline(Local::now(), hhmm);
            }
            debug!("order not accepted yet");
            sleep(self.poll_interval).await;
        }
    }

    async fn countdown(&self, deadline: DateTime<Local>) {
        loop {
            let remaining = (deadline - Local::now()).num_seconds();
            if remaining <= 0 {
                break;
            }
            println!(
                "{:02}:{:02}:{:02} until the order is ready for pickup",
                remaining / 3600,
                remaining % 3600 / 60,
                remaining % 60
            );
            sleep(Duration::from_secs(1)).await;
        }
        println!("Go pick up your food :-)");
    }
}

/// Pull the accepted delivery time out of a status-poll payload.
/// Absent while the order is still pending.
pub fn delivery_time(status: &Value) -> Option<&str> {
    status.get("data")?.get("shopDeliverytime")?.as_str()
}

/// Pickup deadline for an accepted order: today at the shop's `HH:MM`, local
/// time. The shop never sends a date, so a time already past yields a
/// deadline in the past and the countdown simply finishes immediately.
pub fn pickup_deadline(now: DateTime<Local>, hhmm: &str) -> Result<DateTime<Local>> {
    let (hour, minute) = hhmm
        .split_once(':')
        .ok_or_else(|| Error::Format(format!("{hhmm:?} is not an HH:MM time")))?;
    let time = NaiveTime::from_hms_opt(parse_int(hour)?, parse_int(minute)?, 0)
        .ok_or_else(|| Error::Format(format!("{hhmm:?} is out of range")))?;
    Local
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()
        .ok_or_else(|| Error::Format(format!("{hhmm:?} does not exist today")))
}
