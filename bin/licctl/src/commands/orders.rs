//! Order commands: list, get, create, review.

use std::path::Path;

use anyhow::Result;
use licctl_core::{DialogState, Order, OrderCreate, OrderQuery, ReviewDecision, ReviewRequest};

use super::{build_client, print_json};

/// List orders matching the given filters.
pub fn list(query: &OrderQuery, json_output: bool, config_path: &Path) -> Result<()> {
    let client = build_client(config_path)?;
    let page = client.list_orders(query)?;

    if json_output {
        return print_json(&serde_json::json!({
            "items": page.items,
            "total": page.total,
        }));
    }

    if page.items.is_empty() {
        println!("No orders found.");
        return Ok(());
    }

    println!(
        "{:8} {:16} {:24} {:16} {:8} {:8} {:>12}",
        "ID", "PO-NUMBER", "CUSTOMER", "STATUS", "SOURCE", "MODE", "AMOUNT"
    );
    for order in &page.items {
        println!(
            "{:8} {:16} {:24} {:16} {:8} {:8} {:>9.2} {}",
            order.order_id,
            order.po_number,
            order.customer_name,
            order.order_status.style().label,
            order.order_source.as_str(),
            order.activation_mode.as_str(),
            order.amount,
            order.currency,
        );
    }
    println!("({} of {} total)", page.items.len(), page.total);
    Ok(())
}

/// Get a single order by ID or PO number.
pub fn get(
    order_id: Option<i64>,
    po_number: Option<&str>,
    json_output: bool,
    config_path: &Path,
) -> Result<()> {
    let client = build_client(config_path)?;
    let order = match (order_id, po_number) {
        (Some(id), _) => client.get_order(id)?,
        (None, Some(po)) => client.get_order_by_po(po)?,
        (None, None) => anyhow::bail!("Provide an order ID or --po <po_number>."),
    };

    if json_output {
        return print_json(&order);
    }
    print_order(&order);
    Ok(())
}

/// Create an order from a JSON body. Validation runs before any
/// request is sent.
pub fn create(json_body: &str, json_output: bool, config_path: &Path) -> Result<()> {
    let request: OrderCreate = serde_json::from_str(json_body)
        .map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;
    request.validate()?;

    let client = build_client(config_path)?;
    let order = client.create_order(&request)?;

    if json_output {
        return print_json(&order);
    }
    println!("Order created.");
    print_order(&order);
    Ok(())
}

/// Review a pending order: approve or reject, with mandatory notes.
///
/// Whether the order is actually still PENDING is the service's call;
/// a rejection from it is printed verbatim.
pub fn review(
    order_id: i64,
    decision: ReviewDecision,
    notes: &str,
    json_output: bool,
    config_path: &Path,
) -> Result<()> {
    let request = ReviewRequest::new(decision, notes)?;
    let client = build_client(config_path)?;

    let mut dialog = DialogState::default();
    dialog.open();
    if !dialog.submit() {
        anyhow::bail!("Review already in flight.");
    }
    let result = client.review_order(order_id, &request);
    dialog.finish();

    let order = result?;
    if json_output {
        return print_json(&order);
    }
    println!(
        "Order {} is now {}.",
        order.po_number,
        order.order_status.style().label
    );
    Ok(())
}

fn print_order(order: &Order) {
    println!("PO number:    {}", order.po_number);
    println!("Order ID:     {}", order.order_id);
    println!("Customer:     {}", order.customer_name);
    println!(
        "Product:      {} {}",
        order.product_name,
        order.product_version.as_deref().unwrap_or("")
    );
    println!("License type: {}", order.license_type);
    println!("Quantity:     {}", order.quantity);
    println!("Amount:       {:.2} {}", order.amount, order.currency);
    println!("Order date:   {}", order.order_date);
    println!("Status:       {}", order.order_status.style().label);
    println!("Source:       {}", order.order_source.as_str());
    println!("Activation:   {}", order.activation_mode.style().label);
    if let Some(cluster) = &order.cluster_id {
        println!("Cluster:      {}", cluster);
    }
    if let Some(notes) = &order.review_notes {
        println!("Review notes: {}", notes);
    }
    if let Some(reviewer) = &order.reviewed_by {
        println!("Reviewed by:  {}", reviewer);
    }
    if let Some(license_id) = &order.license_id {
        println!("License:      {}", license_id);
    }
}
