//! Test double for [`storage::RosterStore`]: a real in-memory repository with scripted failures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use ccrms_core::{Result, StorageError};
use storage::{Course, Enrollment, RosterRepository, RosterStore, Student};

/// Delegates to an in-memory [`RosterRepository`]; each call first pops a scripted failure, if any.
pub struct ScriptedStore {
    inner: RosterRepository,
    failures: Mutex<VecDeque<StorageError>>,
    calls: AtomicUsize,
    returned_errors: Mutex<Vec<StorageError>>,
}

impl ScriptedStore {
    pub async fn new() -> Self {
        Self {
            inner: RosterRepository::new("sqlite::memory:")
                .await
                .expect("Failed to create repository"),
            failures: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            returned_errors: Mutex::new(Vec::new()),
        }
    }

    /// The next call fails with `err` instead of reaching the database.
    pub fn fail_next(&self, err: StorageError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every error this store handed back, scripted or from the database.
    pub fn returned_errors(&self) -> Vec<StorageError> {
        self.returned_errors.lock().unwrap().clone()
    }

    fn scripted(&self) -> Option<StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.failures.lock().unwrap().pop_front()
    }

    fn record<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.returned_errors.lock().unwrap().push(e.clone());
        }
        result
    }
}

#[async_trait]
impl RosterStore for ScriptedStore {
    async fn add_student(&self, student: &Student) -> Result<()> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.add_student(student).await,
        };
        self.record(result)
    }

    async fn add_course(&self, course: &Course) -> Result<()> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.add_course(course).await,
        };
        self.record(result)
    }

    async fn enroll(&self, enrollment: &Enrollment) -> Result<()> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.enroll(enrollment).await,
        };
        self.record(result)
    }

    async fn withdraw(&self, student_id: &str, course_code: &str) -> Result<bool> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.withdraw(student_id, course_code).await,
        };
        self.record(result)
    }

    async fn get_student(&self, id: &str) -> Result<Option<Student>> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.get_student(id).await,
        };
        self.record(result)
    }

    async fn get_course(&self, code: &str) -> Result<Option<Course>> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.get_course(code).await,
        };
        self.record(result)
    }

    async fn list_enrollments(&self, course_code: &str) -> Result<Vec<Enrollment>> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.list_enrollments(course_code).await,
        };
        self.record(result)
    }

    async fn count_enrollments(&self, course_code: &str) -> Result<i64> {
        let result = match self.scripted() {
            Some(e) => Err(e),
            None => self.inner.count_enrollments(course_code).await,
        };
        self.record(result)
    }
}
