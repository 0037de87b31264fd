// farmlink/src/orders/service.rs

//! Order reads and item status writes against the marketplace API.

use super::batch::{BatchUpdate, ItemUpdateOutcome, ReloadedUpdate};
use crate::client::{ApiRequest, RequestClient};
use crate::error::{ClientError, ClientResult};
use crate::models::{Order, OrderEnvelope, OrdersEnvelope, StatusUpdate};
use crate::status::ItemStatus;
use futures_util::future::join_all;
use tracing::{event, instrument, Level};

pub const ORDERS_ENDPOINT: &str = "/api/orders";
pub const BUYER_ORDERS_ENDPOINT: &str = "/api/orders/buyer";
pub const FARMER_ORDERS_ENDPOINT: &str = "/api/orders/farmer";

pub fn order_endpoint(order_id: u64) -> String {
  format!("/api/orders/{}", order_id)
}

pub fn item_status_endpoint(item_id: u64) -> String {
  format!("/api/orders/item/{}/status", item_id)
}

#[derive(Debug, Clone)]
pub struct OrderService {
  client: RequestClient,
}

impl OrderService {
  pub fn new(client: RequestClient) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &RequestClient {
    &self.client
  }

  /// Every order on the platform (admin view).
  #[instrument(name = "OrderService::list_orders", skip(self), err(Display))]
  pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
    self.fetch_list(ORDERS_ENDPOINT).await
  }

  /// Orders placed by the signed-in buyer.
  #[instrument(name = "OrderService::list_buyer_orders", skip(self), err(Display))]
  pub async fn list_buyer_orders(&self) -> ClientResult<Vec<Order>> {
    self.fetch_list(BUYER_ORDERS_ENDPOINT).await
  }

  /// Orders containing items of the signed-in farmer, restricted to those items.
  #[instrument(name = "OrderService::list_farmer_orders", skip(self), err(Display))]
  pub async fn list_farmer_orders(&self) -> ClientResult<Vec<Order>> {
    self.fetch_list(FARMER_ORDERS_ENDPOINT).await
  }

  async fn fetch_list(&self, endpoint: &str) -> ClientResult<Vec<Order>> {
    let envelope: OrdersEnvelope = self.client.get_json(endpoint).await?;
    event!(Level::DEBUG, count = envelope.orders.len(), endpoint, "Orders fetched.");
    Ok(envelope.orders)
  }

  #[instrument(name = "OrderService::get_order", skip(self), err(Display))]
  pub async fn get_order(&self, order_id: u64) -> ClientResult<Order> {
    let envelope: OrderEnvelope = self.client.get_json(&order_endpoint(order_id)).await?;
    Ok(envelope.order)
  }

  /// Sets one item's status. Unknown statuses are refused locally; the server would
  /// reject them anyway.
  #[instrument(name = "OrderService::update_item_status", skip(self, status), fields(status = %status), err(Display))]
  pub async fn update_item_status(&self, item_id: u64, status: ItemStatus) -> ClientResult<()> {
    if !status.is_recognized() {
      return Err(ClientError::Configuration(format!(
        "Cannot set item {} to unknown status '{}'",
        item_id, status
      )));
    }

    let request = ApiRequest::put(item_status_endpoint(item_id)).json(&StatusUpdate { status })?;
    self.client.execute(request).await?;
    event!(Level::INFO, item_id, "Order item status updated.");
    Ok(())
  }

  /// Moves every item of `order` to `status`, one request per item, all in flight at
  /// once. Waits for all of them and reports each outcome; nothing is rolled back.
  #[instrument(
    name = "OrderService::update_order_status",
    skip(self, order, status),
    fields(order_id = order.id, items = order.items.len(), status = %status)
  )]
  pub async fn update_order_status(&self, order: &Order, status: ItemStatus) -> BatchUpdate {
    let updates = order.items.iter().map(|item| {
      let status = status.clone();
      let item_id = item.id;
      async move {
        ItemUpdateOutcome {
          item_id,
          result: self.update_item_status(item_id, status).await,
        }
      }
    });
    let outcomes = join_all(updates).await;

    let batch = BatchUpdate {
      order_id: order.id,
      target: status,
      outcomes,
    };
    if batch.is_complete() {
      event!(Level::INFO, "Order status updated on every item.");
    } else {
      event!(
        Level::WARN,
        failed = batch.failure_count(),
        "Order status update failed for some items."
      );
    }
    batch
  }

  /// Fire all item updates, await all, then reload the full list so the caller sees
  /// whatever state the server actually ended up in.
  ///
  /// Only a failed lookup of the order is returned as `Err`; nothing was sent then.
  /// Once the updates went out, the batch report is always returned, and a failed
  /// reload shows up in `ReloadedUpdate::orders`.
  #[instrument(name = "OrderService::update_order_status_and_reload", skip(self, status), fields(status = %status))]
  pub async fn update_order_status_and_reload(&self, order_id: u64, status: ItemStatus) -> ClientResult<ReloadedUpdate> {
    let order = self.get_order(order_id).await?;
    let batch = self.update_order_status(&order, status).await;
    let orders = self.list_orders().await;
    if let Err(e) = &orders {
      event!(Level::WARN, order_id, error = %e, "Order list reload failed after status update.");
    }
    Ok(ReloadedUpdate { batch, orders })
  }
}
