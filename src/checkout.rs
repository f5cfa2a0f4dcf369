//! Checkout
//!
//! Formats a submitted order as the multi-line WhatsApp summary and builds
//! the pre-filled deep link for it. Pure formatting: the order is already
//! durably recorded before either function is called, and opening the link
//! is the caller's fire-and-forget concern.

use std::fmt::Write;

use thiserror::Error;
use url::Url;

use crate::{orders::Order, pricing};

/// WhatsApp number of the store, in international format without `+`.
pub const STORE_WHATSAPP_NUMBER: &str = "5511999999999";

/// Errors that can occur while building the deep link.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The deep link could not be assembled.
    #[error("failed to build the WhatsApp link")]
    Link(#[from] url::ParseError),
}

/// Renders the human-readable order summary sent over the messaging channel.
///
/// Contains the customer contact block, one numbered entry per line item
/// (with notes when present), the grand total and the total unit count.
#[must_use]
pub fn order_message(order: &Order) -> String {
    let mut message = String::new();

    _ = write!(
        message,
        "🍰 *NOVO PEDIDO DE BEM CASADO* 🍰\n\n\
         👤 *Cliente:* {}\n\
         📞 *Telefone:* {}\n\
         📧 *Email:* {}\n\
         📍 *Endereço:* {}\n\n\
         📦 *ITENS DO PEDIDO:*\n",
        order.customer.name, order.customer.phone, order.customer.email, order.customer.address,
    );

    for (index, item) in order.line_items.iter().enumerate() {
        _ = write!(
            message,
            "\n{}. *{}* + *{}*\n   Quantidade: {} unidades\n   Subtotal: {}",
            index + 1,
            item.filling.display_name,
            item.packaging.display_name,
            item.quantity,
            pricing::display_brl(item.subtotal),
        );

        if !item.notes.is_empty() {
            _ = write!(message, "\n   Obs: {}", item.notes);
        }

        message.push('\n');
    }

    _ = write!(
        message,
        "\n💰 *VALOR TOTAL: {}*\n\n🔢 *Total de Unidades:* {}",
        pricing::display_brl(order.total),
        pricing::unit_count(&order.line_items),
    );

    message
}

/// Builds the pre-filled `wa.me` deep link for an order.
///
/// # Errors
///
/// Returns [`CheckoutError::Link`] when the link could not be assembled.
pub fn whatsapp_link(order: &Order) -> Result<Url, CheckoutError> {
    let mut link = Url::parse("https://wa.me/")?.join(STORE_WHATSAPP_NUMBER)?;

    link.query_pairs_mut()
        .append_pair("text", order_message(order).trim());

    Ok(link)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        carts::CartLineItem,
        catalog,
        customers::Customer,
        orders::{Order, OrderStatus},
    };

    use super::*;

    fn sample_order() -> TestResult<Order> {
        let brigadeiro = catalog::filling_by_id("brigadeiro")
            .ok_or("brigadeiro should exist")?
            .clone();
        let premium = catalog::packaging_by_id("premium")
            .ok_or("premium should exist")?
            .clone();
        let limao = catalog::filling_by_id("limao")
            .ok_or("limao should exist")?
            .clone();
        let simples = catalog::packaging_by_id("simples")
            .ok_or("simples should exist")?
            .clone();

        let first = CartLineItem::build(&brigadeiro, &premium, 100, "")?;
        let second = CartLineItem::build(&limao, &simples, 50, "laço azul")?;
        let total = first.subtotal + second.subtotal;

        Ok(Order {
            id: "order-1".to_string(),
            customer: Customer {
                id: "c1".to_string(),
                name: "Maria Silva".to_string(),
                email: "maria@example.com".to_string(),
                phone: "(11) 98888-7777".to_string(),
                address: "Rua das Flores, 10".to_string(),
                is_admin: false,
            },
            line_items: vec![first, second],
            total,
            status: OrderStatus::Pending,
            created_at: Timestamp::UNIX_EPOCH,
        })
    }

    #[test]
    fn message_lists_contact_items_total_and_units() -> TestResult {
        let order = sample_order()?;

        let message = order_message(&order);

        assert!(message.contains("*Cliente:* Maria Silva"));
        assert!(message.contains("*Telefone:* (11) 98888-7777"));
        assert!(message.contains("*Endereço:* Rua das Flores, 10"));
        assert!(message.contains("1. *Brigadeiro* + *Premium*"));
        assert!(message.contains("Quantidade: 100 unidades"));
        assert!(message.contains("2. *Limão* + *Simples*"));
        assert!(message.contains(&pricing::display_brl(dec!(400.00))));
        assert!(message.contains(&pricing::display_brl(order.total)));
        assert!(message.contains("*Total de Unidades:* 150"));

        Ok(())
    }

    #[test]
    fn notes_appear_only_when_present() -> TestResult {
        let order = sample_order()?;

        let message = order_message(&order);

        assert_eq!(message.matches("Obs:").count(), 1);
        assert!(message.contains("Obs: laço azul"));

        Ok(())
    }

    #[test]
    fn link_targets_the_store_number_with_prefilled_text() -> TestResult {
        let order = sample_order()?;

        let link = whatsapp_link(&order)?;

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/5511999999999");

        let text = link
            .query_pairs()
            .find(|(key, _)| key == "text")
            .map(|(_, value)| value.into_owned())
            .ok_or("link should carry a text parameter")?;

        assert!(text.contains("NOVO PEDIDO DE BEM CASADO"));
        assert!(text.contains("Maria Silva"));

        Ok(())
    }
}
