//! Hand-written scanners for the overlapping literal family.
//!
//! Identifiers, numbers, ports, intervals, addresses and hostnames share
//! prefixes (`10` starts an integer, a float, a port, an interval and an
//! IPv4 address). Every scanner reports the length of its longest match and
//! [`scan`] keeps the longest overall; ties go to the earlier candidate.

use crate::SyntaxKind;

/// Longest literal at the start of `text`, if any.
pub(super) fn scan(text: &str) -> Option<(SyntaxKind, usize)> {
    let b = text.as_bytes();
    let first = *b.first()?;
    if !(first.is_ascii_alphanumeric() || matches!(first, b'_' | b'.' | b':')) {
        return None;
    }
    let candidates = [
        (SyntaxKind::T_IDENT, ident(b)),
        (SyntaxKind::T_INTEGER, integer(b)),
        (SyntaxKind::T_FLOAT, float(b)),
        (SyntaxKind::T_HEX, hex(b)),
        (SyntaxKind::T_PORT, port(b)),
        (SyntaxKind::T_INTERVAL, interval(b)),
        (SyntaxKind::T_IPV4, ipv4(b)),
        (SyntaxKind::T_IPV6, ipv6(b)),
        (SyntaxKind::T_HOSTNAME, hostname(b)),
    ];
    candidates
        .into_iter()
        .fold(None, |best, (kind, len)| match (best, len) {
            (Some((_, best_len)), Some(len)) if len > best_len => Some((kind, len)),
            (None, Some(len)) => Some((kind, len)),
            (best, _) => best,
        })
}

fn at(b: &[u8], i: usize) -> Option<u8> {
    b.get(i).copied()
}

fn run(b: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    b.get(start..)
        .map_or(0, |tail| tail.iter().take_while(|c| pred(**c)).count())
}

fn digits(b: &[u8], start: usize) -> usize {
    run(b, start, |c| c.is_ascii_digit())
}

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_word(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// `[A-Za-z_][A-Za-z_0-9]*(::[A-Za-z_][A-Za-z_0-9]*)*`
fn ident(b: &[u8]) -> Option<usize> {
    if !at(b, 0).is_some_and(is_word_start) {
        return None;
    }
    let mut i = 1 + run(b, 1, is_word);
    while at(b, i) == Some(b':') && at(b, i + 1) == Some(b':') && at(b, i + 2).is_some_and(is_word_start) {
        i += 3 + run(b, i + 3, is_word);
    }
    Some(i)
}

fn integer(b: &[u8]) -> Option<usize> {
    let n = digits(b, 0);
    (n > 0).then_some(n)
}

/// Digits with a decimal point (one side may be empty) and an optional
/// exponent, or digits with a mandatory exponent.
fn float(b: &[u8]) -> Option<usize> {
    let whole = digits(b, 0);
    let mut i = whole;
    let mut has_point = false;
    if at(b, i) == Some(b'.') {
        let frac = digits(b, i + 1);
        if whole > 0 || frac > 0 {
            has_point = true;
            i += 1 + frac;
        }
    }
    if whole == 0 && !has_point {
        return None;
    }
    let mut has_exponent = false;
    if matches!(at(b, i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(at(b, j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp = digits(b, j);
        if exp > 0 {
            has_exponent = true;
            i = j + exp;
        }
    }
    (has_point || has_exponent).then_some(i)
}

fn hex(b: &[u8]) -> Option<usize> {
    if !b.starts_with(b"0x") {
        return None;
    }
    let n = run(b, 2, |c| c.is_ascii_hexdigit());
    (n > 0).then_some(2 + n)
}

const PROTOCOLS: &[&[u8]] = &[b"tcp", b"udp", b"icmp", b"unknown"];

/// `[0-9]+/(tcp|udp|icmp|unknown)`
fn port(b: &[u8]) -> Option<usize> {
    let n = integer(b)?;
    if at(b, n) != Some(b'/') {
        return None;
    }
    let tail = b.get(n + 1..)?;
    PROTOCOLS
        .iter()
        .find(|proto| tail.starts_with(proto))
        .map(|proto| n + 1 + proto.len())
}

const TIME_UNITS: &[&[u8]] = &[b"msec", b"usec", b"day", b"min", b"sec", b"hr"];

/// `[0-9]+(\.[0-9]+)?[ \t]*(day|hr|min|sec|msec|usec)s?`
fn interval(b: &[u8]) -> Option<usize> {
    let mut i = integer(b)?;
    if at(b, i) == Some(b'.') {
        let frac = digits(b, i + 1);
        if frac > 0 {
            i += 1 + frac;
        }
    }
    i += run(b, i, |c| c == b' ' || c == b'\t');
    let tail = b.get(i..)?;
    let unit = TIME_UNITS.iter().find(|unit| tail.starts_with(unit))?;
    i += unit.len();
    if at(b, i) == Some(b's') {
        i += 1;
    }
    Some(i)
}

/// Dotted quad `[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+`.
fn ipv4(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    for part in 0..4 {
        if part > 0 {
            if at(b, i) != Some(b'.') {
                return None;
            }
            i += 1;
        }
        let n = digits(b, i);
        if n == 0 {
            return None;
        }
        i += n;
    }
    Some(i)
}

/// IPv6 text forms: eight groups, `::` compression, an embedded dotted quad
/// tail and link-local `fe80::…%zone`.
fn ipv6(b: &[u8]) -> Option<usize> {
    let mut i = 0;
    let mut groups = 0;
    let mut compressed = false;
    let mut best = None;
    if b.starts_with(b"::") {
        compressed = true;
        i = 2;
        best = Some(2);
    }
    loop {
        if let Some(quad) = b.get(i..).and_then(ipv4) {
            // A dotted quad stands for two groups.
            if (compressed && groups <= 5) || (!compressed && groups == 6) {
                best = Some(i + quad);
                break;
            }
        }
        let h = run(b, i, |c| c.is_ascii_hexdigit());
        if h == 0 || h > 4 {
            break;
        }
        i += h;
        groups += 1;
        if (compressed && groups <= 7) || groups == 8 {
            best = Some(i);
        }
        if groups == 8 {
            break;
        }
        match (at(b, i), at(b, i + 1)) {
            (Some(b':'), Some(b':')) if !compressed => {
                compressed = true;
                i += 2;
                if groups <= 7 {
                    best = Some(i);
                }
            }
            (Some(b':'), Some(b':')) => break,
            (Some(b':'), _) => i += 1,
            _ => break,
        }
    }
    let end = best?;
    let link_local = b.get(..4).is_some_and(|p| p.eq_ignore_ascii_case(b"fe80"));
    if link_local && compressed && at(b, end) == Some(b'%') {
        let zone = run(b, end + 1, |c| c.is_ascii_alphanumeric());
        if zone > 0 {
            return Some(end + 1 + zone);
        }
    }
    Some(end)
}

/// `([A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z][A-Za-z0-9-]*`
fn hostname(b: &[u8]) -> Option<usize> {
    let label = |c: u8| c.is_ascii_alphanumeric() || c == b'-';
    let mut i = 0;
    let mut labels = 0;
    let mut best = None;
    loop {
        let Some(first) = at(b, i).filter(u8::is_ascii_alphanumeric) else {
            break;
        };
        i += 1 + run(b, i + 1, label);
        if labels > 0 && first.is_ascii_alphabetic() {
            best = Some(i);
        }
        labels += 1;
        if at(b, i) == Some(b'.') {
            i += 1;
        } else {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", SyntaxKind::T_IDENT, 3)]
    #[case("Foo::bar baz", SyntaxKind::T_IDENT, 8)]
    #[case("42", SyntaxKind::T_INTEGER, 2)]
    #[case("1.5", SyntaxKind::T_FLOAT, 3)]
    #[case("1.", SyntaxKind::T_FLOAT, 2)]
    #[case(".25", SyntaxKind::T_FLOAT, 3)]
    #[case("1e10", SyntaxKind::T_FLOAT, 4)]
    #[case("1.2.3", SyntaxKind::T_FLOAT, 3)]
    #[case("0xff", SyntaxKind::T_HEX, 4)]
    #[case("80/tcp", SyntaxKind::T_PORT, 6)]
    #[case("53/unknown", SyntaxKind::T_PORT, 10)]
    #[case("24hrs", SyntaxKind::T_INTERVAL, 5)]
    #[case("5 min", SyntaxKind::T_INTERVAL, 5)]
    #[case("1.5msec", SyntaxKind::T_INTERVAL, 7)]
    #[case("1.2.3.4", SyntaxKind::T_IPV4, 7)]
    #[case("::1", SyntaxKind::T_IPV6, 3)]
    #[case("2001:db8::ff00:42:8329", SyntaxKind::T_IPV6, 22)]
    #[case("1:2:3:4:5:6:7:8", SyntaxKind::T_IPV6, 15)]
    #[case("::ffff:10.0.0.1", SyntaxKind::T_IPV6, 15)]
    #[case("fe80::1%eth0", SyntaxKind::T_IPV6, 12)]
    #[case("www.zeek.org", SyntaxKind::T_HOSTNAME, 12)]
    #[case("dead::beef", SyntaxKind::T_IDENT, 10)]
    fn longest_literal(#[case] src: &str, #[case] kind: SyntaxKind, #[case] len: usize) {
        assert_eq!(scan(src), Some((kind, len)));
    }

    #[rstest]
    #[case("a:b")]
    #[case("1:2")]
    fn colon_pairs_are_not_addresses(#[case] src: &str) {
        assert_eq!(ipv6(src.as_bytes()), None);
    }

    #[test]
    fn punctuation_is_not_a_literal() {
        assert_eq!(scan("(x"), None);
        assert_eq!(scan(":x"), None);
    }
}
