use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::codec::{decode_field, logical_rows, split_row};
use super::gateway;
use super::record::CsvRecord;
use super::StoreError;

/// In-memory table keyed by entity id and bound to its backing file.
///
/// Every mutating method rewrites the whole file before returning. When the
/// rewrite fails the in-memory change is undone so memory and disk agree.
pub struct EntityStore<T: CsvRecord> {
    path: PathBuf,
    records: BTreeMap<T::Key, T>,
}

impl<T: CsvRecord> EntityStore<T> {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: BTreeMap::new(),
        }
    }

    /// Load every well-formed row of `path`. A missing file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut records = BTreeMap::new();

        for record in read_records::<T>(&path)? {
            let key = record.key();
            if records.contains_key(&key) {
                warn!(kind = T::KIND, id = %key, path = %path.display(), "skipping duplicate row");
                continue;
            }
            records.insert(key, record);
        }

        info!(kind = T::KIND, path = %path.display(), records = records.len(), "store loaded");
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.records.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.records.contains_key(key)
    }

    /// Records in key order, which is also the order they are written in.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    /// Add a new record and persist the store.
    pub fn insert(&mut self, record: T) -> Result<(), StoreError> {
        let key = record.key();
        if self.records.contains_key(&key) {
            return Err(StoreError::Duplicate {
                kind: T::KIND,
                id: key.to_string(),
            });
        }

        self.records.insert(key.clone(), record);
        if let Err(err) = self.persist() {
            self.records.remove(&key);
            return Err(err);
        }

        Ok(())
    }

    /// Apply `mutate` to the record under `key` and persist the store.
    ///
    /// `mutate` must not change the record's key.
    pub fn update<Q, F>(&mut self, key: &Q, mutate: F) -> Result<T, StoreError>
    where
        T::Key: Borrow<Q>,
        Q: Ord + ToString + ?Sized,
        F: FnOnce(&mut T),
    {
        let record = self
            .records
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound {
                kind: T::KIND,
                id: key.to_string(),
            })?;

        let previous = record.clone();
        mutate(record);
        let updated = record.clone();

        if let Err(err) = self.persist() {
            if let Some(slot) = self.records.get_mut(key) {
                *slot = previous;
            }
            return Err(err);
        }

        Ok(updated)
    }

    /// Rewrite the backing file from the current contents.
    pub fn persist(&self) -> Result<(), StoreError> {
        gateway::rewrite(
            &self.path,
            T::HEADER,
            self.records.values().map(CsvRecord::to_fields),
        )
    }
}

/// Records grouped under a shared key, in file order within each group.
///
/// Used for applications and withdrawals, which are filed under the
/// internship they refer to rather than an identity of their own.
pub struct GroupedStore<T: CsvRecord> {
    path: PathBuf,
    groups: BTreeMap<T::Key, Vec<T>>,
}

impl<T: CsvRecord> GroupedStore<T> {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            groups: BTreeMap::new(),
        }
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut groups: BTreeMap<T::Key, Vec<T>> = BTreeMap::new();
        let mut total = 0usize;

        for record in read_records::<T>(&path)? {
            groups.entry(record.key()).or_default().push(record);
            total += 1;
        }

        info!(
            kind = T::KIND,
            path = %path.display(),
            groups = groups.len(),
            records = total,
            "store loaded"
        );
        Ok(Self { path, groups })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of records across every group.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group<Q>(&self, key: &Q) -> &[T]
    where
        T::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.groups.values().flatten()
    }

    /// Append a record to its group and persist the store.
    pub fn push(&mut self, record: T) -> Result<(), StoreError> {
        let key = record.key();
        self.groups.entry(key.clone()).or_default().push(record);

        if let Err(err) = self.persist() {
            if let Some(group) = self.groups.get_mut(&key) {
                group.pop();
                if group.is_empty() {
                    self.groups.remove(&key);
                }
            }
            return Err(err);
        }

        Ok(())
    }

    /// Apply `mutate` to the first record in `key`'s group matching
    /// `predicate` and persist the store.
    pub fn update_where<P, F>(&mut self, key: &T::Key, predicate: P, mutate: F) -> Result<T, StoreError>
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let not_found = || StoreError::NotFound {
            kind: T::KIND,
            id: key.to_string(),
        };

        let group = self.groups.get_mut(key).ok_or_else(not_found)?;
        let index = group.iter().position(&predicate).ok_or_else(not_found)?;

        let previous = group[index].clone();
        mutate(&mut group[index]);
        let updated = group[index].clone();

        if let Err(err) = self.persist() {
            if let Some(group) = self.groups.get_mut(key) {
                group[index] = previous;
            }
            return Err(err);
        }

        Ok(updated)
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        gateway::rewrite(&self.path, T::HEADER, self.iter().map(CsvRecord::to_fields))
    }
}

/// Parse every data row of `path`, skipping the header and any row that
/// fails validation.
fn read_records<T: CsvRecord>(path: &Path) -> Result<Vec<T>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(kind = T::KIND, path = %path.display(), "data file not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut records = Vec::new();
    for (index, row) in logical_rows(&text).iter().enumerate().skip(1) {
        let fields: Vec<String> = split_row(row).iter().map(|raw| decode_field(raw)).collect();
        match T::parse_row(&fields) {
            Ok(record) => records.push(record),
            Err(err) => warn!(
                kind = T::KIND,
                path = %path.display(),
                row = index,
                error = %err,
                "skipping malformed row"
            ),
        }
    }

    Ok(records)
}
