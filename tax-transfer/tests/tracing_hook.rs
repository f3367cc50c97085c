//! Checks the `debug` events `TracingHook` emits for each balance change.

use std::{
    io,
    sync::{Arc, Mutex},
};

use bth_tax_transfer::{transfer, Address, MemoryLedger, TaxConfig, TracingHook, U256};

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}

fn addr(n: u64) -> Address {
    Address::from_low_u64_be(n)
}

#[test]
fn test_taxed_transfer_logs_each_balance_change() {
    let (a, b, c, t) = (addr(0xa), addr(0xb), addr(0xc), addr(0x7));
    let mut ledger = MemoryLedger::with_hook(TracingHook);
    ledger.set_balance(a, U256::from(1000u64));

    let output = capture(|| {
        transfer(&mut ledger, a, b, U256::from(1000u64), &TaxConfig::new(5, t), c).unwrap();
    });

    let changes: Vec<&str> = output
        .lines()
        .filter(|line| line.contains("Balance changed"))
        .collect();
    assert_eq!(changes.len(), 3, "{output}");

    assert!(changes[0].contains(&format!("address={a:?}")));
    assert!(changes[0].contains("previous=1000"));
    assert!(changes[0].contains("current=0"));
    assert!(changes[0].contains("reason=transfer_decrement"));

    assert!(changes[1].contains(&format!("address={b:?}")));
    assert!(changes[1].contains("current=950"));
    assert!(changes[1].contains("reason=transfer_increment"));

    assert!(changes[2].contains(&format!("address={t:?}")));
    assert!(changes[2].contains("current=50"));
    assert!(changes[2].contains("reason=transfer_increment"));

    assert!(output.contains("Taxed transfer"));
}

#[test]
fn test_exempt_transfer_logs_two_changes() {
    let (a, c, t) = (addr(0xa), addr(0xc), addr(0x7));
    let mut ledger = MemoryLedger::with_hook(TracingHook);
    ledger.set_balance(a, U256::from(1000u64));

    let output = capture(|| {
        transfer(&mut ledger, a, c, U256::from(1000u64), &TaxConfig::new(5, t), c).unwrap();
    });

    assert_eq!(output.matches("Balance changed").count(), 2, "{output}");
    assert!(!output.contains(&format!("address={t:?}")));
    // The untaxed path is logged at trace, below the captured level
    assert!(!output.contains("Untaxed transfer"));
}
