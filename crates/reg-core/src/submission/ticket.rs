//! Generación de identificadores legibles de ticket.
//!
//! `TimestampTicketIssuer` concatena un prefijo (código del evento) con el
//! instante actual en microsegundos, en base 36 y mayúsculas. Dentro de un
//! mismo proceso los valores son estrictamente crecientes; entre procesos
//! la colisión es posible si dos envíos caen en el mismo microsegundo.
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub trait TicketIssuer: Send + Sync {
    fn prefix(&self) -> &str;
    fn issue(&self) -> String;
}

#[derive(Debug)]
pub struct TimestampTicketIssuer {
    prefix: String,
    last: AtomicI64,
}

impl TimestampTicketIssuer {
    pub fn new(prefix: impl AsRef<str>) -> Self {
        let prefix: String = prefix.as_ref()
                                   .trim()
                                   .chars()
                                   .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                                   .collect::<String>()
                                   .to_ascii_uppercase();
        Self { prefix,
               last: AtomicI64::new(0) }
    }

    fn next_stamp(&self) -> i64 {
        let now = Utc::now().timestamp_micros();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > prev { now } else { prev + 1 };
            match self.last.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Relaxed) {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl TicketIssuer for TimestampTicketIssuer {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn issue(&self) -> String {
        let stamp = to_base36(self.next_stamp().max(0) as u64);
        if self.prefix.is_empty() {
            stamp
        } else {
            format!("{}-{}", self.prefix, stamp)
        }
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn tickets_carry_uppercased_prefix_and_are_unique_in_process() {
        let issuer = TimestampTicketIssuer::new(" epri-2026 ");
        assert_eq!(issuer.prefix(), "EPRI-2026");
        let a = issuer.issue();
        let b = issuer.issue();
        assert!(a.starts_with("EPRI-2026-"));
        assert_ne!(a, b);
        assert_eq!(a, a.to_ascii_uppercase());
    }
}
