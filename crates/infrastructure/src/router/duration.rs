use dnslist_domain::DomainError;

const MILLIS_PER_SECOND: u64 = 1_000;

/// Parses a RouterOS duration into whole seconds.
///
/// Accepts the unit form the REST API returns (`1w2d3h4m5s`, `500ms`), bare
/// seconds (`45`) and the older clock form (`1d02:03:04`, `00:05:00`).
/// Sub-second remainders are truncated; values past `u32::MAX` saturate.
pub fn parse_routeros_duration(input: &str) -> Result<u32, DomainError> {
    let value = input.trim();
    if value.is_empty() {
        return Err(invalid(input));
    }

    let millis = if value.bytes().all(|b| b.is_ascii_digit()) {
        parse_number(value, input)?.saturating_mul(MILLIS_PER_SECOND)
    } else if value.contains(':') {
        parse_clock(value, input)?
    } else {
        parse_units(value, input)?
    };

    Ok(u32::try_from(millis / MILLIS_PER_SECOND).unwrap_or(u32::MAX))
}

fn parse_units(value: &str, input: &str) -> Result<u64, DomainError> {
    let mut total: u64 = 0;
    let mut rest = value;

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid(input));
        }
        let amount = parse_number(&rest[..digits], input)?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let scale = match unit {
            "w" => 7 * 24 * 3_600 * MILLIS_PER_SECOND,
            "d" => 24 * 3_600 * MILLIS_PER_SECOND,
            "h" => 3_600 * MILLIS_PER_SECOND,
            "m" => 60 * MILLIS_PER_SECOND,
            "s" | "" => MILLIS_PER_SECOND,
            "ms" => 1,
            _ => return Err(invalid(input)),
        };

        total = total.saturating_add(amount.saturating_mul(scale));
    }

    Ok(total)
}

fn parse_clock(value: &str, input: &str) -> Result<u64, DomainError> {
    let (days, clock) = match value.split_once('d') {
        Some((days, clock)) => (parse_number(days, input)?, clock),
        None => (0, value),
    };

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid(input));
    };
    let s = s.split_once('.').map_or(s, |(whole, _)| whole);

    let seconds = days
        .saturating_mul(86_400)
        .saturating_add(parse_number(h, input)?.saturating_mul(3_600))
        .saturating_add(parse_number(m, input)?.saturating_mul(60))
        .saturating_add(parse_number(s, input)?);

    Ok(seconds.saturating_mul(MILLIS_PER_SECOND))
}

fn parse_number(digits: &str, input: &str) -> Result<u64, DomainError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input));
    }
    Ok(digits.parse::<u64>().unwrap_or(u64::MAX))
}

fn invalid(input: &str) -> DomainError {
    DomainError::InvalidDnsResponse(format!("invalid RouterOS duration: {input:?}"))
}
