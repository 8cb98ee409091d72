//! In-memory backend that records every boundary call.

use super::{LineAppearanceApi, TextField};
use crate::handle::{RawRecord, RecordHandle};
use std::collections::HashMap;
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct MockRecord {
    text: HashMap<TextField, CString>,
    state: c_int,
    appearance: c_int,
}

/// Mock native backend.
///
/// Addresses are synthetic and never dereferenced. A free of an address that
/// is not live is counted as a double free instead of panicking.
#[derive(Default)]
pub(crate) struct MockApi {
    records: Mutex<HashMap<usize, MockRecord>>,
    next_addr: AtomicUsize,
    allocations: AtomicUsize,
    frees: AtomicUsize,
    double_frees: AtomicUsize,
    fail_allocation: AtomicBool,
}

impl MockApi {
    pub(crate) fn new() -> Self {
        Self {
            next_addr: AtomicUsize::new(0x1000),
            ..Self::default()
        }
    }

    /// Makes every following `allocate` return null.
    pub(crate) fn failing() -> Self {
        let api = Self::new();
        api.fail_allocation.store(true, Ordering::SeqCst);
        api
    }

    pub(crate) fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub(crate) fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    pub(crate) fn double_frees(&self) -> usize {
        self.double_frees.load(Ordering::SeqCst)
    }

    pub(crate) fn live(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Writes a raw state value, bypassing the proxy.
    pub(crate) fn poke_state(&self, record: RawRecord, raw: c_int) {
        let mut records = self.records.lock().unwrap();
        records.get_mut(&(record as usize)).unwrap().state = raw;
    }

    /// Writes raw bytes into a text field, bypassing the proxy.
    pub(crate) fn poke_text(&self, record: RawRecord, field: TextField, bytes: &[u8]) {
        let mut records = self.records.lock().unwrap();
        let value = CString::new(bytes.to_vec()).unwrap();
        records
            .get_mut(&(record as usize))
            .unwrap()
            .text
            .insert(field, value);
    }

    fn with_record<T>(&self, record: RecordHandle, f: impl FnOnce(&mut MockRecord) -> T) -> T {
        let mut records = self.records.lock().unwrap();
        let entry = records
            .get_mut(&(record.as_raw() as usize))
            .expect("mock record accessed after free");
        f(entry)
    }
}

impl LineAppearanceApi for MockApi {
    fn allocate(&self) -> RawRecord {
        if self.fail_allocation.load(Ordering::SeqCst) {
            return ptr::null_mut();
        }
        let addr = self.next_addr.fetch_add(0x10, Ordering::SeqCst);
        self.records
            .lock()
            .unwrap()
            .insert(addr, MockRecord::default());
        self.allocations.fetch_add(1, Ordering::SeqCst);
        addr as RawRecord
    }

    unsafe fn free(&self, record: RecordHandle) {
        let addr = record.as_raw() as usize;
        self.frees.fetch_add(1, Ordering::SeqCst);
        let removed = self.records.lock().unwrap().remove(&addr).is_some();
        if !removed {
            self.double_frees.fetch_add(1, Ordering::SeqCst);
        }
    }

    unsafe fn text(&self, record: RecordHandle, field: TextField) -> *const c_char {
        self.with_record(record, |r| {
            r.text.get(&field).map_or(ptr::null(), |s| s.as_ptr())
        })
    }

    unsafe fn set_text(&self, record: RecordHandle, field: TextField, value: *const c_char) {
        let value = (!value.is_null()).then(|| CStr::from_ptr(value).to_owned());
        self.with_record(record, |r| match value {
            Some(value) => {
                r.text.insert(field, value);
            }
            None => {
                r.text.remove(&field);
            }
        })
    }

    unsafe fn state(&self, record: RecordHandle) -> c_int {
        self.with_record(record, |r| r.state)
    }

    unsafe fn set_state(&self, record: RecordHandle, state: c_int) {
        self.with_record(record, |r| r.state = state)
    }

    unsafe fn appearance(&self, record: RecordHandle) -> c_int {
        self.with_record(record, |r| r.appearance)
    }

    unsafe fn set_appearance(&self, record: RecordHandle, appearance: c_int) {
        self.with_record(record, |r| r.appearance = appearance)
    }
}
