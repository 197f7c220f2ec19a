use log::debug;

use crate::model::{IngredientEntry, IngredientErrors, StepEntry};
use crate::validation::{validate_ingredient, validate_step};
use crate::FormError;

/// A row of a dynamic list, addressed by its synthetic id
pub trait Entry {
    /// Validation result stored alongside the entry
    type Errors: Default + Clone + PartialEq;

    /// Name used in messages, e.g. "ingredient"
    const KIND: &'static str;

    fn id(&self) -> u32;
    fn blank(id: u32) -> Self;
    fn validate(&self) -> Self::Errors;
    fn is_valid(errors: &Self::Errors) -> bool;
}

impl Entry for IngredientEntry {
    type Errors = IngredientErrors;
    const KIND: &'static str = "ingredient";

    fn id(&self) -> u32 {
        self.id
    }

    fn blank(id: u32) -> Self {
        IngredientEntry::empty(id)
    }

    fn validate(&self) -> IngredientErrors {
        validate_ingredient(self)
    }

    fn is_valid(errors: &IngredientErrors) -> bool {
        errors.is_empty()
    }
}

impl Entry for StepEntry {
    type Errors = String;
    const KIND: &'static str = "step";

    fn id(&self) -> u32 {
        self.id
    }

    fn blank(id: u32) -> Self {
        StepEntry::empty(id)
    }

    fn validate(&self) -> String {
        validate_step(self)
    }

    fn is_valid(errors: &String) -> bool {
        errors.is_empty()
    }
}

/// Ordered entries plus one error slot per entry, kept in step.
///
/// Entries are looked up by id, never by position, so removing a row from
/// the middle does not shift which row an edit applies to. The list never
/// becomes empty.
#[derive(Debug, Clone)]
pub struct EntryList<T: Entry> {
    entries: Vec<T>,
    errors: Vec<T::Errors>,
}

impl<T: Entry> EntryList<T> {
    pub fn new(mut entries: Vec<T>) -> Self {
        if entries.is_empty() {
            entries.push(T::blank(1));
        }
        let errors = vec![T::Errors::default(); entries.len()];
        Self { entries, errors }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn errors(&self) -> &[T::Errors] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Error slot of the entry with `id`
    pub fn error(&self, id: u32) -> Option<&T::Errors> {
        self.position(id).map(|index| &self.errors[index])
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Id the next added entry will get
    pub fn next_id(&self) -> u32 {
        self.entries.iter().map(T::id).max().map_or(1, |max| max + 1)
    }

    /// Append a blank entry and an empty error slot, returning the new id
    pub fn add(&mut self) -> u32 {
        let id = self.next_id();
        self.entries.push(T::blank(id));
        self.errors.push(T::Errors::default());
        debug!("Added {} {}", T::KIND, id);
        id
    }

    /// Apply `edit` to the entry and re-validate it
    pub fn update(&mut self, id: u32, edit: impl FnOnce(&mut T)) -> Result<(), FormError> {
        let index = self.index_of(id)?;
        edit(&mut self.entries[index]);
        self.errors[index] = self.entries[index].validate();
        Ok(())
    }

    /// Re-validate the entry and let `merge` decide which parts of the fresh
    /// result replace the stored errors
    pub fn revalidate_with(
        &mut self,
        id: u32,
        merge: impl FnOnce(T::Errors, &mut T::Errors),
    ) -> Result<(), FormError> {
        let index = self.index_of(id)?;
        let fresh = self.entries[index].validate();
        merge(fresh, &mut self.errors[index]);
        Ok(())
    }

    /// Mutable access without re-validation, for fields no validator reads
    pub fn get_mut(&mut self, id: u32) -> Option<&mut T> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    /// Check that the entry exists and is not the last one
    pub fn check_removable(&self, id: u32) -> Result<usize, FormError> {
        if self.entries.len() <= 1 {
            return Err(FormError::LastEntry(T::KIND));
        }
        self.index_of(id)
    }

    /// Remove the entry and its error slot
    pub fn remove(&mut self, id: u32) -> Result<T, FormError> {
        let index = self.check_removable(id)?;
        self.errors.remove(index);
        debug!("Removed {} {}", T::KIND, id);
        Ok(self.entries.remove(index))
    }

    /// Validate every entry, storing the results. Returns true when all pass.
    pub fn validate_all(&mut self) -> bool {
        self.errors = self.entries.iter().map(T::validate).collect();
        self.errors.iter().all(T::is_valid)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.iter().all(T::is_valid)
    }

    fn index_of(&self, id: u32) -> Result<usize, FormError> {
        self.position(id).ok_or(FormError::UnknownEntry { kind: T::KIND, id })
    }
}
