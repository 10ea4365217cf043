use chrono::Month;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    comparator::{Comparison, ComparisonRow},
    core::{BatteryArbitrage, HourlyAllocation},
    quantity::{cost::Cost, price::MegawattHourPrice},
    scenario::ScenarioResult,
};

const ABSENT: &str = "—";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn optional_cell(value: Option<impl ToString>) -> Cell {
    value.map_or_else(
        || Cell::new(ABSENT).add_attribute(Attribute::Dim),
        |value| Cell::new(value.to_string()),
    )
    .set_alignment(CellAlignment::Right)
}

pub fn build_summary_table(result: &ScenarioResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Total", "LCOE"]);
    table.add_row(vec![
        Cell::new("Demand"),
        Cell::new(result.total_demand).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Spot"),
        Cell::new(result.total_spot_cost).set_alignment(CellAlignment::Right),
        optional_cell(result.lcoe.spot),
    ]);
    table.add_row(vec![
        Cell::new("Spot + battery"),
        optional_cell(result.total_battery_cost),
        optional_cell(result.lcoe.battery),
    ]);
    table.add_row(vec![
        Cell::new("Battery + PPA + spot"),
        Cell::new(result.total_hybrid_cost)
            .set_alignment(CellAlignment::Right)
            .fg(if result.total_hybrid_cost <= result.total_spot_cost { Color::Green } else { Color::Red }),
        optional_cell(result.lcoe.hybrid),
    ]);
    table.add_row(vec![
        Cell::new("Full PPA"),
        Cell::new(result.total_ppa_cost).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Hedge settlement"),
        Cell::new(result.total_hedge_settlement)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("CO2"),
        Cell::new(result.co2).set_alignment(CellAlignment::Right),
        Cell::new(result.emission_factor.intensity)
            .set_alignment(CellAlignment::Right)
            .fg(if result.emission_factor.is_fallback { Color::DarkYellow } else { Color::Reset }),
    ]);
    table
}

pub fn build_monthly_table(result: &ScenarioResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Spot cost", "Share"]);
    for (month, cost) in (1..=12).filter_map(|month| Month::try_from(month).ok()).zip(result.monthly_spot_costs) {
        let share = if result.total_spot_cost == Cost::ZERO {
            None
        } else {
            Some(format!("{:.1} %", 100.0 * (cost / result.total_spot_cost)))
        };
        table.add_row(vec![
            Cell::new(month.name()),
            Cell::new(cost).set_alignment(CellAlignment::Right),
            optional_cell(share).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_hourly_table(allocations: &[HourlyAllocation]) -> Table {
    let mean_price = if allocations.is_empty() {
        MegawattHourPrice::ZERO
    } else {
        allocations.iter().map(|allocation| allocation.spot_price).sum::<MegawattHourPrice>()
            / allocations.len() as f64
    };

    let mut table = new_table();
    table.set_header(vec![
        "Date", "Time", "Price", "Demand", "Mode", "Battery", "Hedge", "Spot", "Cost", "Charge",
    ]);
    for allocation in allocations {
        table.add_row(vec![
            Cell::new(allocation.timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(allocation.timestamp.format("%H:%M")),
            Cell::new(allocation.spot_price)
                .set_alignment(CellAlignment::Right)
                .fg(if allocation.spot_price >= mean_price { Color::Red } else { Color::Green }),
            Cell::new(allocation.demand).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(allocation.battery_mode).fg(allocation.battery_mode.color()),
            Cell::new(allocation.discharge).set_alignment(CellAlignment::Right),
            Cell::new(allocation.hedge).set_alignment(CellAlignment::Right),
            Cell::new(allocation.spot).set_alignment(CellAlignment::Right),
            Cell::new(allocation.hourly_cost).set_alignment(CellAlignment::Right),
            Cell::new(allocation.state_of_charge).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_savings_table(arbitrage: &BatteryArbitrage) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Discharge value", "Charge cost", "Saving"]);
    for day in arbitrage.days() {
        let saving = day.saving();
        table.add_row(vec![
            Cell::new(day.date.format("%Y-%m-%d")),
            Cell::new(day.discharge_value).set_alignment(CellAlignment::Right),
            Cell::new(day.charge_cost).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(saving)
                .set_alignment(CellAlignment::Right)
                .fg(if saving >= Cost::ZERO { Color::Green } else { Color::Red }),
        ]);
    }
    table
}

type Column = (&'static str, fn(&ComparisonRow) -> Option<String>);

/// Countries side by side, columns without a single value are left out.
pub fn build_comparison_table(comparison: &Comparison) -> Table {
    let columns: [Column; 11] = [
        ("Demand", |row| row.total_demand().map(|value| value.to_string())),
        ("Spot", |row| row.total_spot_cost().map(|value| value.to_string())),
        ("Spot + battery", |row| row.total_battery_cost().map(|value| value.to_string())),
        ("Hybrid", |row| row.total_hybrid_cost().map(|value| value.to_string())),
        ("Full PPA", |row| row.total_ppa_cost().map(|value| value.to_string())),
        ("LCOE spot", |row| row.lcoe_spot().map(|value| value.to_string())),
        ("LCOE battery", |row| row.lcoe_battery().map(|value| value.to_string())),
        ("LCOE hybrid", |row| row.lcoe_hybrid().map(|value| value.to_string())),
        ("CO2", |row| row.co2().map(|value| value.to_string())),
        ("Intensity", |row| row.emission_factor().map(|value| value.to_string())),
        ("Error", |row| row.error().map(ToString::to_string)),
    ];
    let columns: Vec<Column> = columns
        .into_iter()
        .filter(|(_, get)| comparison.rows.iter().any(|row| get(row).is_some()))
        .collect();

    let mut table = new_table();
    table.set_header(
        std::iter::once("Country").chain(columns.iter().map(|(header, _)| *header)).collect::<Vec<_>>(),
    );
    for row in &comparison.rows {
        let country = Cell::new(&row.country).fg(if row.error().is_some() { Color::Red } else { Color::Reset });
        table.add_row(
            std::iter::once(country).chain(columns.iter().map(|(_, get)| optional_cell(get(row)))).collect::<Vec<_>>(),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::HedgeConfig,
        country::Country,
        demand::DemandTier,
        emissions::EmissionFactor,
        error::Error,
        prelude::*,
        scenario::{Scenario, evaluate},
        series::tests::price_series,
    };

    #[test]
    fn test_comparison_hides_empty_columns() -> Result {
        let prices = price_series(&[10.0; 24]);
        let demand = DemandTier::FiveMegawattHours.series(&prices);
        let hedge = HedgeConfig::builder().ppa_price(MegawattHourPrice::from(50.0)).build();
        let result = evaluate(&prices, &demand, None, &hedge, EmissionFactor::FALLBACK)?;
        let comparison = Comparison {
            scenario: Scenario::builder().year(2024).demand_tier(DemandTier::FiveMegawattHours).hedge(hedge).build(),
            rows: vec![
                ComparisonRow { country: Country::new("Spain"), outcome: Ok(result) },
                ComparisonRow {
                    country: Country::new("Atlantis"),
                    outcome: Err(Error::EmptyRange { country: Country::new("Atlantis"), year: 2024 }),
                },
            ],
        };
        let rendered = build_comparison_table(&comparison).to_string();
        assert!(rendered.contains("Spain (ES)"));
        assert!(rendered.contains(ABSENT));
        assert!(rendered.contains("Error"));
        assert!(!rendered.contains("Spot + battery"));
        assert!(!rendered.contains("LCOE battery"));
        Ok(())
    }
}
