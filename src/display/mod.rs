//! Formatting glue the admin tables repeat: Vietnamese currency and
//! dates, coupon value labels.

use jiff::Timestamp;

use crate::records::coupon::{Coupon, CouponKind};

/// Format an amount as Vietnamese đồng: grouped with `.` and suffixed
/// with the currency sign, e.g. `1.250.000 ₫`. VND has no minor unit, so
/// fractions are rounded away.
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Format a timestamp as a `vi-VN` short date, `dd/MM/yyyy`.
pub fn format_date(ts: Timestamp) -> String {
    ts.strftime("%d/%m/%Y").to_string()
}

/// The value cell of a coupon row: percentage coupons show `15%`, fixed
/// coupons show the amount in đồng.
pub fn coupon_value_label(coupon: &Coupon) -> String {
    match coupon.kind {
        CouponKind::Percentage => format!("{}%", coupon.value),
        CouponKind::Fixed => format_vnd(coupon.value),
    }
}
