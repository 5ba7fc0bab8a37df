use std::io;

use eventiverse::{
    bookings::Booking, catalog::Event, context::AppContext, prices::line_total, session::User,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::cli::CliError;

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: Columns<std::ops::Range<usize>>,
) -> Result<(), CliError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(numeric, Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

pub(crate) fn events(out: &mut impl io::Write, events: &[Event]) -> Result<(), CliError> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Title", "Date", "Location", "Category", "Price"]);

    for event in events {
        builder.push_record([
            event.id.as_str(),
            event.title.as_str(),
            event.date.as_str(),
            event.location.as_str(),
            event.category.as_str(),
            event.price.as_str(),
        ]);
    }

    write_table(out, builder, Columns::new(5..6))
}

pub(crate) fn event_details(out: &mut impl io::Write, event: &Event) -> Result<(), CliError> {
    writeln!(out, "{} ({})", event.title, event.category)?;
    writeln!(out, "  when:  {}", event.date)?;

    if let Some(time) = &event.time {
        writeln!(out, "         {time}")?;
    }

    writeln!(out, "  where: {}", event.location)?;
    writeln!(out, "  price: {}", event.price)?;

    if let (Some(available), Some(total)) = (event.available_tickets, event.total_tickets) {
        writeln!(out, "  tickets: {available} of {total} available")?;
    }

    if let Some(description) = &event.description {
        writeln!(out, "\n{description}")?;
    }

    Ok(())
}

pub(crate) fn cart(out: &mut impl io::Write, app: &AppContext) -> Result<(), CliError> {
    let items = app.cart_items();

    if items.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Event", "Title", "Price", "Qty", "Line total"]);

    for item in &items {
        let line = line_total(&item.price, item.quantity)
            .map(|amount| app.pricing.money(amount).to_string())
            .unwrap_or_default();

        builder.push_record([
            item.event_id.clone(),
            item.event_title.clone(),
            item.price.clone(),
            item.quantity.to_string(),
            line,
        ]);
    }

    write_table(out, builder, Columns::new(2..5))?;

    let totals = app.cart_totals().map_err(CliError::Totals)?;

    writeln!(out, "Tickets:          {}", app.cart_item_count())?;
    writeln!(out, "Subtotal:         {}", totals.subtotal)?;
    writeln!(out, "Taxes and fees:   {}", totals.tax)?;
    writeln!(out, "Total:            {}", totals.total)?;

    Ok(())
}

pub(crate) fn bookings(
    out: &mut impl io::Write,
    app: &AppContext,
    bookings: &[Booking],
) -> Result<(), CliError> {
    if bookings.is_empty() {
        writeln!(out, "No bookings")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Booking", "Event", "Location", "Qty", "Total", "Booked", "Status"]);

    for booking in bookings {
        // Location is looked up for display only; the record keeps its own title.
        let location = app
            .catalog
            .find_event(&booking.event_id)
            .map_or_else(|| "-".to_string(), |event| event.location);

        builder.push_record([
            booking.id.clone(),
            booking.event_title.clone(),
            location,
            booking.quantity.to_string(),
            app.pricing.money(booking.total_price).to_string(),
            booking.booking_date.strftime("%Y-%m-%d %H:%M").to_string(),
            booking.status.to_string(),
        ]);
    }

    write_table(out, builder, Columns::new(3..5))
}

pub(crate) fn booking_details(
    out: &mut impl io::Write,
    app: &AppContext,
    booking: &Booking,
) -> Result<(), CliError> {
    writeln!(out, "{}", booking.id)?;
    writeln!(out, "  event:  {} ({})", booking.event_title, booking.event_id)?;

    if let Some(event) = app.catalog.find_event(&booking.event_id) {
        writeln!(out, "  when:   {}, {}", event.date, event.location)?;
    }

    writeln!(out, "  qty:    {}", booking.quantity)?;
    writeln!(out, "  total:  {}", app.pricing.money(booking.total_price))?;
    writeln!(out, "  booked: {}", booking.booking_date)?;
    writeln!(out, "  status: {}", booking.status)?;

    Ok(())
}

pub(crate) fn user(out: &mut impl io::Write, user: &User) -> Result<(), CliError> {
    writeln!(out, "{} <{}>", user.name, user.email)?;
    writeln!(out, "  id: {}", user.id)?;

    if let Some(avatar) = &user.avatar {
        writeln!(out, "  avatar: {avatar}")?;
    }

    Ok(())
}
