//! HTTP session against the Pizzaria Burgerhouse site.
//!
//! The site is plain PHP with server-side session state: authentication and
//! the cart both live in the `PHPSESSID` cookie, and state-changing requests
//! answer with a 302 redirect on success. Redirect following is therefore
//! disabled so status codes stay visible, and one cookie jar is shared across
//! the whole run.
//!
//! Call order matters: `login` first, then `reorder` to populate the
//! server-side cart, then the two checkout phases, then `fetch_pending_order`
//! and `poll_status`.

use crate::config::CheckoutProfile;
use crate::error::{Error, Result};
use crate::extract;
use crate::order::{CartItem, Order, PendingOrder};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

pub const BASE_URL: &str = "http://pizzaria-burgerhouse.dk";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/104.0.0.0 Safari/537.36 Edg/104.0.1293.47";

/// One authenticated browser-like session: HTTP client, cookie jar, base URL.
pub struct Session {
    http: Client,
    cookies: Arc<Jar>,
    base_url: Url,
}

impl Session {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Format(format!("invalid base URL {base_url:?}: {e}")))?;
        let cookies = Arc::new(Jar::default());
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(cookies.clone())
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            http,
            cookies,
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Format(format!("invalid path {path:?}: {e}")))
    }

    /// Authenticate the session. The login endpoint redirects on success and
    /// re-renders the login form (200) when the credentials are rejected.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url("/login.php")?)
            .form(&[
                ("username", username),
                ("password", password),
                ("doLogin", " Log ind "),
            ])
            .send()
            .await?;
        interpret_login_status(response.status())
    }

    /// Fetch the order history, most recent order first.
    pub async fn list_recent_orders(&self) -> Result<Vec<Order>> {
        let page = self
            .http
            .get(self.url("/mypage.php")?)
            .send()
            .await?
            .text()
            .await?;
        extract::orders(&page)
    }

    /// Copy a historical order's line items into the server-side cart.
    /// Only succeeds when the order belongs to the authenticated customer.
    pub async fn reorder(&self, order: &Order) -> Result<()> {
        let response = self
            .http
            .post(self.url("/reorder.php")?)
            .form(&[
                ("orderId", order.id.to_string()),
                ("customerId", order.customer_id.to_string()),
            ])
            .send()
            .await?;
        expect_redirect(response.status(), "reorder")
    }

    /// Fetch the single top-level line currently in the cart.
    pub async fn check_cart(&self) -> Result<CartItem> {
        let page = self
            .http
            .get(self.url("/cart.php")?)
            .send()
            .await?
            .text()
            .await?;
        extract::cart_item(&page)
    }

    /// Delete a cart line via its removal link.
    pub async fn remove_item(&self, item: &CartItem) -> Result<()> {
        self.http
            .get(self.url(&item.remove_href)?)
            .send()
            .await?;
        Ok(())
    }

    /// First checkout phase: fetch the one-time token from the information
    /// page and post the delivery profile. This fixes the delivery details
    /// server-side but does not place the order yet.
    pub async fn checkout_start(&self, profile: &CheckoutProfile) -> Result<()> {
        let page = self
            .http
            .get(self.url("/checkout_information.php")?)
            .send()
            .await?
            .text()
            .await?;
        let token = extract::checkout_token(&page)?;
        debug!("posting checkout information");
        self.http
            .post(self.url("/processors/checkout_process.php")?)
            .form(&checkout_form(profile, &token))
            .send()
            .await?;
        Ok(())
    }

    /// Second checkout phase: accept the terms and place the order. The
    /// endpoint wants the cart identifier (the session cookie) as a query
    /// parameter.
    pub async fn checkout_finalize(&self) -> Result<()> {
        let cart_id = self.cart_session_id()?;
        let response = self
            .http
            .post(self.url("/processors/checkout_finalize.php")?)
            .query(&[("cartId", cart_id.as_str())])
            .form(&[("terms", "ok")])
            .send()
            .await?;
        expect_redirect(response.status(), "checkout finalize")
    }

    /// Read the freshly placed order off the success page.
    pub async fn fetch_pending_order(&self) -> Result<PendingOrder> {
        let page = self
            .http
            .get(self.url("/checkout_success.php")?)
            .send()
            .await?
            .text()
            .await?;
        extract::pending_order(&page)
    }

    /// Ask the shop whether the order has been accepted. Returns the JSON
    /// payload verbatim; `data.shopDeliverytime` appears once it has.
    pub async fn poll_status(&self, pending: &PendingOrder) -> Result<Value> {
        let order_id = pending.id.to_string();
        let elapsed = pending.elapsed_seconds().to_string();
        let response = self
            .http
            .get(self.url("/ajax/_ajax.php")?)
            .query(&[
                ("token", pending.status_token.as_str()),
                ("action", "checkshopresponse"),
                ("format", "json"),
                ("orderid", order_id.as_str()),
                ("timerunning", elapsed.as_str()),
            ])
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;
        Ok(response.json().await?)
    }

    fn cart_session_id(&self) -> Result<String> {
        let header = self
            .cookies
            .cookies(&self.base_url)
            .ok_or_else(|| Error::NotFound("no cookies for base URL".to_string()))?;
        let raw = header
            .to_str()
            .map_err(|_| Error::Format("cookie header is not valid UTF-8".to_string()))?;
        find_cookie(raw, "PHPSESSID")
            .map(str::to_string)
            .ok_or_else(|| Error::NotFound("PHPSESSID cookie".to_string()))
    }
}

fn interpret_login_status(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::FOUND => Ok(()),
        StatusCode::OK => Err(Error::Auth),
        status => Err(Error::Operation(format!(
            "unexpected status {status} from login"
        ))),
    }
}

fn expect_redirect(status: StatusCode, what: &str) -> Result<()> {
    if status == StatusCode::FOUND {
        Ok(())
    } else {
        Err(Error::Operation(format!(
            "unexpected status {status} from {what}"
        )))
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split("; ")
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

fn checkout_form(profile: &CheckoutProfile, token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("delivery", "1".to_string()),
        ("deliveryTime", "1".to_string()),
        ("deliveryDate", String::new()),
        ("payment", "1".to_string()),
        ("cust_id", String::new()),
        ("cust_name", profile.name.clone()),
        ("cust_address", profile.address.clone()),
        ("cityList", profile.city_list.clone()),
        ("token", token.to_string()),
        ("cust_zip", profile.zip.clone()),
        ("cust_city", profile.city.clone()),
        ("cust_mobile", profile.mobile.clone()),
        ("cust_phone", profile.phone.clone()),
        ("cust_email", profile.email.clone()),
        ("cust_email_verify", profile.email.clone()),
        ("cust_comments", profile.comments.clone()),
        ("couponKey", String::new()),
        ("show-timeslot-pop", "0".to_string()),
    ]
}
