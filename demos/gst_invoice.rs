//! GST invoice computation examples

use bigdecimal::BigDecimal;
use gst_invoice_core::{
    Customer, DiscountMode, EngineConfig, GstSlab, InvoiceEngine, InvoiceRequest, InvoiceTotals,
    LineItem, StateCode,
};
use gst_invoice_core::utils::round_currency;
use tracing_subscriber::EnvFilter;

fn print_totals(totals: &InvoiceTotals) {
    println!("    Subtotal:        ₹{}", totals.sub_total);
    println!("    Discount:        ₹{}", totals.total_discount);
    println!("    CGST:            ₹{}", totals.total_cgst);
    println!("    SGST:            ₹{}", totals.total_sgst);
    println!("    IGST:            ₹{}", totals.total_igst);
    println!("    Shipping:        ₹{}", totals.shipping_charges);
    println!("    Grand Total:     ₹{}", totals.grand_total);
    println!("    Paid:            ₹{}", totals.paid_amount);
    println!("    Balance:         ₹{}", totals.balance);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🧾 GST Invoice Core - Invoice Examples\n");

    println!("📊 Standard GST Slabs:");
    for slab in GstSlab::ALL {
        println!("  {:?}: {}%", slab, slab.rate());
    }
    println!();

    let config = EngineConfig::from_json_str(r#"{ "sellerState": "27-Maharashtra" }"#)?;
    let engine = InvoiceEngine::new(config)?;
    if let Some(seller) = StateCode::parse(&engine.config().seller_state) {
        println!("🏢 Seller registered in {}\n", seller);
    }

    let items = vec![
        LineItem::new(BigDecimal::from(1000), BigDecimal::from(2), BigDecimal::from(18))
            .with_description("Office chair")
            .with_hsn_code("9401"),
        LineItem::new(BigDecimal::from(118), BigDecimal::from(5), BigDecimal::from(18))
            .with_description("USB cable (MRP, tax inclusive)")
            .with_hsn_code("8544")
            .inclusive(),
        LineItem::new(BigDecimal::from(60), BigDecimal::from(10), BigDecimal::from(5))
            .with_description("Tea, 250g")
            .with_hsn_code("0902")
            .with_discount_percent(BigDecimal::from(10)),
    ];

    for (label, state) in [
        ("Intra-state sale (CGST + SGST)", "27-Maharashtra"),
        ("Inter-state sale (IGST)", "06-Haryana"),
    ] {
        let request = InvoiceRequest::new(
            Customer {
                name: "Shree Ganesh Stores".to_string(),
                state: Some(state.to_string()),
                gstin: None,
            },
            items.clone(),
        )
        .with_shipping_charges(BigDecimal::from(50))
        .with_paid_amount(BigDecimal::from(1500));

        let invoice = engine.compute(&request)?;
        println!("🧾 {} to {}:", label, state);
        for line in &invoice.lines {
            println!(
                "    {} × {} @ ₹{} = ₹{} (taxable ₹{})",
                line.description.as_deref().unwrap_or("-"),
                line.quantity,
                line.rate,
                round_currency(&line.line_total, 2),
                round_currency(&line.taxable_amount, 2)
            );
        }
        print_totals(&invoice.display_totals);

        println!("    HSN summary:");
        for row in &invoice.display_totals.tax_summary.rows {
            println!(
                "      {}: taxable ₹{}, tax ₹{}",
                row.hsn_code.as_deref().unwrap_or("-"),
                row.taxable_amount,
                row.total_tax
            );
        }
        println!();
    }

    println!("💸 Order-level discount of ₹400:");
    let order_level = InvoiceEngine::new(
        EngineConfig::for_seller("27-Maharashtra").with_discount_mode(DiscountMode::OrderLevel),
    )?;
    let invoice = order_level.compute_json(
        r#"{
            "customer": { "name": "Walk-in", "state": "27-Maharashtra" },
            "items": [
                { "rate": 1000, "quantity": 1, "taxRate": 18, "hsnCode": "9401" },
                { "rate": 3000, "quantity": 1, "taxRate": 18, "hsnCode": "9403" }
            ],
            "discount": 400
        }"#,
    )?;
    for line in &invoice.lines {
        println!(
            "    {}: item total ₹{}, discount ₹{}",
            line.hsn_code, line.item_total, line.discount_amount
        );
    }
    print_totals(&invoice.display_totals);

    println!("\n🎉 Invoice examples completed successfully!");
    Ok(())
}
