//! Second-dropping for with-seconds tokens.

use crate::token::TokenShape;

/// Drops the seconds fields of every 15-character token.
///
/// `DDMMSS[NS]DDDMMSS[EW]` becomes `DDMM[NS]DDDMM[EW]`; tokens of any other
/// shape are left out of the result. Seconds are truncated, not rounded.
///
/// ```
/// use aerocoord_geo::trim;
///
/// assert_eq!(trim(&["574706N0614453E", "5747N06144E"]), vec!["5747N06144E"]);
/// ```
pub fn trim<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| TokenShape::detect(t) == Some(TokenShape::WithSeconds))
        .map(|t| {
            let (lat, lon) = t.split_at(TokenShape::WithSeconds.latitude_len());
            // DDMM + hemisphere, DDDMM + hemisphere
            format!("{}{}{}{}", &lat[..4], &lat[6..], &lon[..5], &lon[7..])
        })
        .collect()
}
