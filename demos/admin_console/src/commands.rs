// admin_console/src/commands.rs

use crate::cli::{Command, ItemsCommand, OrdersCommand};
use crate::errors::{AppError, Result};
use crate::render;
use crate::state::AppState;
use farmlink::orders::orders_in_tab;
use farmlink::{ClientError, ClientResult, Order, OrderService, OrderSummary};
use tracing::{event, instrument, Level};

/// Runs one console command and returns what should be printed.
#[instrument(name = "admin_console::run", skip_all, fields(api_url = %state.config.api_url))]
pub async fn run(command: Command, state: &AppState) -> Result<String> {
  dispatch(command, &state.orders).await
}

pub(crate) async fn dispatch(command: Command, orders: &OrderService) -> Result<String> {
  match command {
    Command::Orders(OrdersCommand::List { tab }) => {
      let all = orders.list_orders().await?;
      let listed = orders_in_tab(&all, tab);
      event!(Level::DEBUG, total = all.len(), listed = listed.len(), %tab, "Orders filtered.");
      Ok(render::orders_table(&listed))
    }
    Command::Orders(OrdersCommand::Show { order_id }) => match orders.get_order(order_id).await {
      Ok(order) => Ok(render::order_detail(&order)),
      Err(ClientError::Server { status: 404, .. }) => Err(AppError::NotFound(format!("order {}", order_id))),
      Err(e) => Err(e.into()),
    },
    Command::Orders(OrdersCommand::SetStatus { order_id, status }) => {
      let update = orders.update_order_status_and_reload(order_id, status).await?;
      let batch = update.batch;
      let mut out = render::batch_report(&batch);
      out.push_str(&reload_note(&update.orders, |order| order.id == order_id));
      if batch.is_complete() {
        Ok(out)
      } else {
        // The report is still useful on failure; print it before the error line.
        eprint!("{}", out);
        Err(AppError::PartialUpdate {
          failed: batch.failure_count(),
          total: batch.outcomes.len(),
          retryable: batch.is_retryable(),
        })
      }
    }
    Command::Items(ItemsCommand::SetStatus { item_id, status }) => {
      orders.update_item_status(item_id, status.clone()).await?;
      let mut out = format!("Item {} set to {}.\n", item_id, status);
      let reloaded = orders.list_orders().await;
      out.push_str(&reload_note(&reloaded, |order| order.item(item_id).is_some()));
      Ok(out)
    }
    Command::Summary => {
      let all = orders.list_orders().await?;
      Ok(render::summary(&OrderSummary::from_orders(&all)))
    }
  }
}

/// One line on where the changed order stands after the reload. A failed reload is
/// reported but does not fail the command; the updates already went through.
fn reload_note(reloaded: &ClientResult<Vec<Order>>, is_target: impl Fn(&Order) -> bool) -> String {
  match reloaded {
    Ok(all) => match all.iter().find(|order| is_target(order)) {
      Some(order) => format!(
        "Order {} is now: {}\n",
        order.display_number(),
        order.composite_status().label()
      ),
      None => String::new(),
    },
    Err(e) => {
      event!(Level::WARN, error = %e, "Could not reload orders after the update.");
      format!("Could not reload orders to show the new status: {}\n", e)
    }
  }
}
