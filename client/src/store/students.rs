//! Students store.

use std::sync::Arc;

use classboard_engine::{Action, AttendStatus, CollectionState, Operation, Student, StudentId};

use super::{Hub, Settlement, Slice};
use crate::gateway::StudentsGateway;

/// Students collection: the roster is listed, then patched field by field.
///
/// Grades are sent as given; use [`classboard_engine::validate_grade`] before
/// issuing [`StudentsStore::update_grade`].
pub struct StudentsStore<G> {
    gateway: Arc<G>,
    slice: Slice<Student>,
}

impl<G> Clone for StudentsStore<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            slice: self.slice.clone(),
        }
    }
}

impl<G: StudentsGateway> StudentsStore<G> {
    pub(crate) fn new(gateway: Arc<G>, hub: Hub) -> Self {
        Self {
            gateway,
            slice: Slice::new(hub),
        }
    }

    pub fn state(&self) -> CollectionState<Student> {
        self.slice.state()
    }

    pub async fn fetch(&self) -> Settlement<Vec<Student>> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.list_students().await };
        self.slice
            .run(Operation::List, call, |students| {
                Action::Listed(students.clone())
            })
            .await
    }

    pub async fn update_attend(&self, id: StudentId, attend: AttendStatus) -> Settlement<Student> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.update_attend(id, attend).await };
        self.slice.run(Operation::UpdateAttend, call, replace).await
    }

    pub async fn update_grade(&self, id: StudentId, grade: u8) -> Settlement<Student> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.update_grade(id, grade).await };
        self.slice.run(Operation::UpdateGrade, call, replace).await
    }

    pub async fn update_online(&self, id: StudentId, online: bool) -> Settlement<Student> {
        let gateway = Arc::clone(&self.gateway);
        let call = async move { gateway.update_online(id, online).await };
        self.slice.run(Operation::UpdateOnline, call, replace).await
    }

    pub fn clear_error(&self) {
        self.slice.commit(Action::ClearError);
    }
}

fn replace(student: &Student) -> Action<Student> {
    Action::Updated(student.clone())
}
