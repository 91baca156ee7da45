use clap::Args;
use encore::offerings::{Offering, OfferingKind, PricingUnit};
use encore_app::lists::load_catalog;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use super::Backend;

#[derive(Debug, Args)]
pub(crate) struct OfferingsArgs {
    /// Only list offerings that can be booked now
    #[arg(long)]
    available: bool,
}

pub(crate) async fn run(backend: &Backend, args: OfferingsArgs) -> Result<(), String> {
    let catalog = load_catalog(backend.api.as_ref())
        .await
        .map_err(|error| format!("failed to load offerings: {}", error.user_message()))?;

    if catalog.is_empty() {
        println!("no offerings found");
        return Ok(());
    }

    let offerings: Vec<&Offering<'_>> = if args.available {
        [
            OfferingKind::Room,
            OfferingKind::PartyPackage,
            OfferingKind::MenuItem,
        ]
        .into_iter()
        .flat_map(|kind| catalog.available(kind))
        .collect()
    } else {
        catalog.offerings().iter().collect()
    };

    let mut builder = Builder::default();

    builder.push_record(["Id", "Kind", "Name", "Price", "Capacity", "Status"]);

    for offering in offerings {
        builder.push_record([
            offering.id().to_string(),
            offering.kind().to_string(),
            offering.name().to_string(),
            format!(
                "{}{}",
                offering.base_price(),
                unit_suffix(offering.pricing_unit())
            ),
            offering.capacity().to_string(),
            offering.availability().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..5), Alignment::right());

    println!("{table}");

    if !catalog.add_ons().is_empty() {
        let mut builder = Builder::default();

        builder.push_record(["Id", "Add-on", "Price"]);

        for add_on in catalog.add_ons() {
            builder.push_record([
                add_on.id().to_string(),
                add_on.name().to_string(),
                add_on.price().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(2..3), Alignment::right());

        println!("{table}");
    }

    Ok(())
}

fn unit_suffix(unit: PricingUnit) -> &'static str {
    match unit {
        PricingUnit::PerHour => " / hour",
        PricingUnit::PerUnit => " each",
        PricingUnit::PerBooking => "",
    }
}
