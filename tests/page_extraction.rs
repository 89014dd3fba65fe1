//! Extraction against full page fixtures shaped like the live site.

use burgerhouse::extract;
use burgerhouse::workflow::delivery_time;
use chrono::NaiveDate;
use serde_json::json;

const MYPAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div id="content">
    <table title="Ugens tilbud"><tr><td>Familiepizza 129,00 DKK</td></tr></table>
    <table title="Mine bestillinger" class="orders">
      <tr><th>Nr.</th><th>Dato</th><th>Antal</th><th>Pris</th><th>Status</th><th></th></tr>
      <tr class="myOrderDetails">
        <td><b>44120</b></td>
        <td>20-08-22 17:45</td>
        <td>2</td>
        <td>1.234,50 DKK</td>
        <td><span>Leveret</span></td>
        <td>
          <form action="/reorder.php" method="post">
            <input type="hidden" name="customerId" value="2879"/>
            <input type="submit" value="Bestil igen"/>
          </form>
        </td>
      </tr>
      <tr class="myOrderDetails">
        <td>44028</td>
        <td>11-08-22 19:07</td>
        <td>1</td>
        <td>76,00 DKK</td>
        <td>Bestilt</td>
        <td><input type="hidden" name="customerId" value="2879"/></td>
      </tr>
    </table>
  </div>
</body>
</html>"#;

#[test]
fn order_history_in_document_order() {
    let orders = extract::orders(MYPAGE).unwrap();
    assert_eq!(orders.len(), 2);

    // Most recent first, as the site renders it.
    assert_eq!(orders[0].id, 44120);
    assert_eq!(orders[0].item_count, 2);
    assert_eq!(orders[0].price, 1234.50);
    assert_eq!(orders[0].status, "Leveret");

    assert_eq!(orders[1].id, 44028);
    assert_eq!(
        orders[1].placed_at,
        NaiveDate::from_ymd_opt(2022, 8, 11)
            .unwrap()
            .and_hms_opt(19, 7, 0)
            .unwrap()
    );
    assert_eq!(orders[1].price, 76.0);
    assert_eq!(orders[1].customer_id, 2879);
}

const CART: &str = r#"<!DOCTYPE html>
<html>
<body>
  <table id="cartTableId">
    <tr><th></th><th>Produkt</th><th>Antal</th><th>Pris</th></tr>
    <tr class="cart-row">
      <td><a href="cart.php?remove=3496801837"><img src="x.png"/></a></td>
      <td>164 Kylling</td>
      <td><span>1</span></td>
      <td>76,00 DKK</td>
    </tr>
    <tr class="cart-row customizeable-topping">
      <td></td>
      <td>+ Ekstra ost</td>
      <td>1</td>
      <td>8,00 DKK</td>
    </tr>
  </table>
</body>
</html>"#;

#[test]
fn cart_reads_the_top_level_line_only() {
    let item = extract::cart_item(CART).unwrap();
    assert_eq!(item.remove_href, "cart.php?remove=3496801837");
    assert_eq!(item.product, "164 Kylling");
    assert_eq!(item.quantity, 1);
    assert_eq!(item.price, 76.0);
}

const CHECKOUT_INFORMATION: &str = r#"<!DOCTYPE html>
<html>
<body>
  <form action="/processors/checkout_process.php" method="post">
    <input type="text" name="cust_name"/>
    <input type="hidden" id="token" name="token" value="9f86d081884c7d65"/>
  </form>
</body>
</html>"#;

#[test]
fn checkout_token_from_information_page() {
    let token = extract::checkout_token(CHECKOUT_INFORMATION).unwrap();
    assert_eq!(token, "9f86d081884c7d65");
}

const CHECKOUT_SUCCESS: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1>Tak for din bestilling!</h1>
  <script type="text/javascript">
    startOrderVerificationProcess("c29tZXRva2Vu",60,"44121");
  </script>
</body>
</html>"#;

#[test]
fn pending_order_from_success_page() {
    let pending = extract::pending_order(CHECKOUT_SUCCESS).unwrap();
    assert_eq!(pending.id, 44121);
    assert_eq!(pending.status_token, "c29tZXRva2Vu");
    assert!(pending.elapsed_seconds() < 60);
}

#[test]
fn acceptance_payload_round_trip() {
    let pending = json!({"status": "ok", "data": {"shopResponse": null}});
    assert_eq!(delivery_time(&pending), None);

    let accepted = json!({"status": "ok", "data": {"shopDeliverytime": "18:30"}});
    assert_eq!(delivery_time(&accepted), Some("18:30"));
}
