//! Economic and environmental projections for a (stream, consumer) pairing.
//!
//! All projections are annual and assume the stream's midpoint monthly
//! quantity is shipped every month.

use crate::core::round_to;
use crate::models::{Consumer, Economics, Environmental, Stream};

/// Currency tag of every monetary figure
pub const CURRENCY: &str = "INR";

/// Road freight cost per ton per kilometer
const TRANSPORT_COST_PER_TON_KM: f64 = 4.0;

/// Landfill disposal cost per ton the producer no longer pays
const DISPOSAL_COST_PER_TON: f64 = 6_000.0;

/// Tons of CO2 emitted per ton landfilled
const LANDFILL_EMISSION_FACTOR: f64 = 0.8;

/// Tons of CO2 emitted per ton recycled
const RECYCLING_EMISSION_FACTOR: f64 = 0.15;

/// Tons of CO2 emitted per ton-kilometer of freight
const TRANSPORT_EMISSION_PER_TON_KM: f64 = 0.000_12;

/// Trucks return empty, so every haul is paid for twice
const ROUND_TRIP_FACTOR: f64 = 2.0;

/// Share of recycled material that replaces virgin material, in percent
pub const RECOVERY_RATE_PCT: u8 = 75;

pub fn calculate_economics(stream: &Stream, consumer: &Consumer, distance_km: f64) -> Economics {
    let annual_quantity = stream.annual_quantity_tons();
    let price_per_ton = consumer.pricing_model.price_per_ton();

    let annual_revenue = annual_quantity * price_per_ton;
    let annual_transport = annual_quantity * distance_km * TRANSPORT_COST_PER_TON_KM;
    let disposal_avoided = annual_quantity * DISPOSAL_COST_PER_TON;

    let net_benefit = if price_per_ton > 0.0 {
        annual_revenue - annual_transport + disposal_avoided
    } else {
        // Collection fee: the "revenue" is a cost to the producer
        disposal_avoided - annual_revenue.abs() - annual_transport
    };

    Economics {
        annual_revenue: round_to(annual_revenue, 0),
        annual_transport_cost: round_to(annual_transport, 0),
        disposal_cost_avoided: round_to(disposal_avoided, 0),
        net_annual_benefit: round_to(net_benefit, 0),
        price_per_ton: round_to(price_per_ton, 0),
        annual_quantity_tons: round_to(annual_quantity, 1),
        currency: CURRENCY.to_string(),
    }
}

pub fn calculate_environmental(stream: &Stream, distance_km: f64) -> Environmental {
    let annual_quantity = stream.annual_quantity_tons();

    let landfill_emissions = annual_quantity * LANDFILL_EMISSION_FACTOR;
    let recycling_emissions = annual_quantity * RECYCLING_EMISSION_FACTOR;
    let transport_emissions =
        annual_quantity * distance_km * TRANSPORT_EMISSION_PER_TON_KM * ROUND_TRIP_FACTOR;
    let co2_saved = landfill_emissions - (recycling_emissions + transport_emissions);

    let recovery_rate = f64::from(RECOVERY_RATE_PCT) / 100.0;

    Environmental {
        co2_saved_tons_annual: round_to(co2_saved.max(0.0), 2),
        landfill_diverted_tons_annual: round_to(annual_quantity, 1),
        virgin_material_avoided_tons: round_to(annual_quantity * recovery_rate, 1),
        recycling_efficiency_pct: RECOVERY_RATE_PCT,
    }
}
