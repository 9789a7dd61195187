//! Delivery costing, shared by both calculators.
//!
//! Each destination ships as one parcel of `weight_per_copy × quantity` kg,
//! priced by the zone of its department code and the parcel weight bracket.

use tracing::trace;

use crate::rate_card::brackets::{zone_for_destination, WeightBracket};
use crate::rate_card::TransportRates;
use crate::types::Delivery;

/// Total delivery cost of a split shipment.
///
/// Destinations with no copies are skipped. A tail lift adds the fixed
/// surcharge to its destination.
pub fn delivery_cost(deliveries: &[Delivery], weight_per_copy_kg: f64, rates: &TransportRates) -> f64 {
    deliveries
        .iter()
        .filter(|d| d.quantity > 0)
        .map(|d| parcel_cost(d, weight_per_copy_kg, rates))
        .sum()
}

fn parcel_cost(delivery: &Delivery, weight_per_copy_kg: f64, rates: &TransportRates) -> f64 {
    let parcel_kg = weight_per_copy_kg * f64::from(delivery.quantity);
    let zone = zone_for_destination(&delivery.department, &rates.zones);
    let bracket = WeightBracket::for_weight(parcel_kg);
    let cost = rates.parcel_cost(zone, bracket);

    trace!(
        department = %delivery.department,
        ?zone,
        ?bracket,
        parcel_kg,
        cost,
        tail_lift = delivery.tail_lift,
        "priced parcel"
    );

    if delivery.tail_lift {
        cost + rates.tail_lift_surcharge
    } else {
        cost
    }
}
