//! Order detail page layout and rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rust_decimal::{Decimal, RoundingStrategy};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::checkout::ScriptStatus;
use crate::models::Order;
use crate::tui::app::App;
use crate::tui::components::message_box::{Variant, loading_box, message_box};

/// Renders the order page for `order_id`.
pub fn render(frame: &mut Frame, area: Rect, app: &App, order_id: &str) {
    let view = &app.view;

    if view.loading {
        let para = Paragraph::new(loading_box()).block(page_block(order_id));
        frame.render_widget(para, area);
        return;
    }

    if let Some(ref error) = view.error {
        let para = Paragraph::new(message_box(Variant::Danger, error.as_str()))
            .block(page_block(order_id))
            .wrap(Wrap { trim: false });
        frame.render_widget(para, area);
        return;
    }

    let Some(ref order) = view.order else {
        frame.render_widget(Paragraph::new(loading_box()).block(page_block(order_id)), area);
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Heading
            Constraint::Min(8),    // Details + summary
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        format!(" Order {order_id}"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(layout[1]);

    let details = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Shipping
            Constraint::Length(4), // Payment
            Constraint::Min(3),    // Items
        ])
        .split(columns[0]);

    render_shipping(frame, details[0], order);
    render_payment(frame, details[1], order);
    render_items(frame, details[2], order);
    render_summary(frame, columns[1], app, order);
}

fn page_block(order_id: &str) -> Block<'static> {
    Block::default()
        .title(format!(" Order {order_id} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn card(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

/// Renders the shipping card.
fn render_shipping(frame: &mut Frame, area: Rect, order: &Order) {
    let address = &order.shipping_address;
    let delivery = if order.is_delivered {
        message_box(
            Variant::Success,
            format!("Delivered at {}", order.delivered_at.as_deref().unwrap_or("-")),
        )
    } else {
        message_box(Variant::Danger, "Not Delivered")
    };

    let lines = vec![
        Line::from(vec![label("Name: "), Span::raw(address.full_name.clone())]),
        Line::from(vec![label("Address: "), Span::raw(address.one_line())]),
        delivery,
    ];
    frame.render_widget(Paragraph::new(lines).block(card(" Shipping ")), area);
}

/// Renders the payment card.
fn render_payment(frame: &mut Frame, area: Rect, order: &Order) {
    let status = if order.is_paid {
        message_box(
            Variant::Success,
            format!("Paid at {}", order.paid_at.as_deref().unwrap_or("-")),
        )
    } else {
        message_box(Variant::Danger, "Not Paid")
    };

    let lines = vec![
        Line::from(vec![label("Method: "), Span::raw(order.payment_method.clone())]),
        status,
    ];
    frame.render_widget(Paragraph::new(lines).block(card(" Payment ")), area);
}

/// Renders the item list, two lines per item.
fn render_items(frame: &mut Frame, area: Rect, order: &Order) {
    let block = card(" Items ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Quantity and price columns take a fixed 16 cells.
    let name_width = (inner.width as usize).saturating_sub(16).max(8);

    let mut lines: Vec<Line> = Vec::with_capacity(order.order_items.len() * 2);
    for item in &order.order_items {
        lines.push(Line::from(vec![
            Span::styled(
                fit(&item.name, name_width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{:>4}", item.quantity)),
            Span::raw(format!("  $ {}", item.price)),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", item.product_path()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(format!("  {}", item.image), Style::default().fg(Color::DarkGray)),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No items",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the order summary and, for unpaid orders, the payment panel.
fn render_summary(frame: &mut Frame, area: Rect, app: &App, order: &Order) {
    let mut lines = vec![
        summary_line("Items", order.items_price),
        summary_line("Shipping", order.shipping_price),
        summary_line("Tax (13%)", order.tax_price),
        summary_line("Order Total", order.total_price),
    ];

    if !order.is_paid {
        lines.push(Line::raw(""));
        lines.extend(payment_panel(app, order));
    }

    let para = Paragraph::new(lines)
        .block(card(" Order Summary "))
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

fn summary_line(name: &str, amount: Decimal) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{name:<12}")),
        Span::styled(
            format!(": ${}", money(amount)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Payment buttons, their loading state, and any pending approval.
fn payment_panel(app: &App, order: &Order) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let status = &app.script.status;
    if status.is_pending() {
        lines.push(loading_box());
    } else if let ScriptStatus::Rejected(reason) = status {
        lines.push(message_box(Variant::Danger, format!("PayPal unavailable: {reason}")));
    } else if app.checkout.creating {
        lines.push(message_box(Variant::Info, "Creating PayPal order..."));
    } else if let Some(ref pending) = app.checkout.pending {
        lines.push(Line::raw("Approve the payment at:"));
        lines.push(Line::from(Span::styled(
            pending.approve_url().unwrap_or("(no approval link)").to_string(),
            Style::default().fg(Color::Cyan),
        )));
        if app.checkout.capturing {
            lines.push(message_box(Variant::Info, "Capturing payment..."));
        } else {
            lines.push(Line::raw("then press [a] to capture"));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!(" [p] Pay with PayPal  ${} ", money(order.total_price)),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if app.view.loading_pay {
        lines.push(loading_box());
    }

    lines
}

/// Two-decimal display amount, halves rounded away from zero.
fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Truncates or pads `text` to exactly `width` display cells.
fn fit(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{text}{}", " ".repeat(width - text.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
