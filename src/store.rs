//! In-memory record store.
//!
//! `CollegeStore` stands in for the persistence collaborator: it keeps one
//! map per entity kind, rejects records that fail validation or point at
//! missing rows, enforces the unique student and registration numbers and
//! the mastery attempt limit, and maintains the reverse indexes (program to
//! students, state to students, and so on) that entities do not carry.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use bitcollege_core::{DomainError, ensure_valid};
use bitcollege_models::{
    AcademicProgram, AcademicProgramId, Course, CourseId, GradePointState, GradePointStateId,
    Registration, RegistrationId, StateBands, Student, StudentId,
};

use crate::snapshot::CollegeSnapshot;

#[derive(Debug, Default)]
pub struct CollegeStore {
    grade_point_states: HashMap<GradePointStateId, GradePointState>,
    programs: HashMap<AcademicProgramId, AcademicProgram>,
    courses: HashMap<CourseId, Course>,
    students: HashMap<StudentId, Student>,
    registrations: HashMap<RegistrationId, Registration>,

    student_numbers: HashMap<i64, StudentId>,
    registration_numbers: HashMap<i64, RegistrationId>,

    students_by_program: HashMap<AcademicProgramId, HashSet<StudentId>>,
    students_by_state: HashMap<GradePointStateId, HashSet<StudentId>>,
    courses_by_program: HashMap<AcademicProgramId, HashSet<CourseId>>,
    registrations_by_student: HashMap<StudentId, HashSet<RegistrationId>>,
    registrations_by_course: HashMap<CourseId, HashSet<RegistrationId>>,
}

/// Record counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub grade_point_states: usize,
    pub programs: usize,
    pub courses: usize,
    pub students: usize,
    pub registrations: usize,
}

fn link<K, V>(index: &mut HashMap<K, HashSet<V>>, key: K, value: V)
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    index.entry(key).or_default().insert(value);
}

fn unlink<K, V>(index: &mut HashMap<K, HashSet<V>>, key: &K, value: &V)
where
    K: Hash + Eq,
    V: Hash + Eq,
{
    if let Some(values) = index.get_mut(key) {
        values.remove(value);
        if values.is_empty() {
            index.remove(key);
        }
    }
}

fn has_links<K, V>(index: &HashMap<K, HashSet<V>>, key: &K) -> bool
where
    K: Hash + Eq,
{
    index.get(key).is_some_and(|values| !values.is_empty())
}

impl CollegeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every record of `snapshot`, parents before children.
    pub fn from_snapshot(snapshot: CollegeSnapshot) -> Result<Self, DomainError> {
        let mut store = Self::new();
        for state in snapshot.grade_point_states {
            store.save_grade_point_state(state)?;
        }
        for program in snapshot.academic_programs {
            store.save_academic_program(program)?;
        }
        for course in snapshot.courses {
            store.save_course(course)?;
        }
        for student in snapshot.students {
            store.save_student(student)?;
        }
        for registration in snapshot.registrations {
            store.save_registration(registration)?;
        }
        Ok(store)
    }

    /// Copy every record out, each kind ordered by its business key.
    pub fn snapshot(&self) -> CollegeSnapshot {
        let mut grade_point_states: Vec<_> = self.grade_point_states.values().cloned().collect();
        grade_point_states.sort_by_key(|state| state.kind);

        let mut academic_programs: Vec<_> = self.programs.values().cloned().collect();
        academic_programs.sort_by(|a, b| a.program_acronym.cmp(&b.program_acronym));

        let mut courses: Vec<_> = self.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.course_number.cmp(&b.course_number));

        let mut students: Vec<_> = self.students.values().cloned().collect();
        students.sort_by_key(|student| student.student_number);

        let mut registrations: Vec<_> = self.registrations.values().cloned().collect();
        registrations.sort_by_key(|registration| registration.registration_number);

        CollegeSnapshot {
            grade_point_states,
            academic_programs,
            courses,
            students,
            registrations,
        }
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            grade_point_states: self.grade_point_states.len(),
            programs: self.programs.len(),
            courses: self.courses.len(),
            students: self.students.len(),
            registrations: self.registrations.len(),
        }
    }

    // ------------------------------------------------------------------
    // Grade point states
    // ------------------------------------------------------------------

    /// Insert or replace a state row. Only one row per kind is allowed.
    pub fn save_grade_point_state(&mut self, state: GradePointState) -> Result<(), DomainError> {
        ensure_valid(&state)?;
        if let Some(existing) = self
            .grade_point_states
            .values()
            .find(|existing| existing.kind == state.kind && existing.id != state.id)
        {
            return Err(DomainError::Conflict(format!(
                "{} is already configured as {}",
                state.kind, existing.id
            )));
        }
        self.grade_point_states.insert(state.id, state);
        Ok(())
    }

    pub fn grade_point_state(&self, id: GradePointStateId) -> Result<&GradePointState, DomainError> {
        self.grade_point_states
            .get(&id)
            .ok_or_else(|| DomainError::not_found("grade point state", id))
    }

    pub fn grade_point_states(&self) -> impl Iterator<Item = &GradePointState> {
        self.grade_point_states.values()
    }

    /// The verified classification table built from the stored state rows.
    pub fn state_bands(&self) -> Result<StateBands, DomainError> {
        StateBands::new(self.grade_point_states.values().cloned())
    }

    pub fn remove_grade_point_state(
        &mut self,
        id: GradePointStateId,
    ) -> Result<GradePointState, DomainError> {
        self.grade_point_state(id)?;
        if has_links(&self.students_by_state, &id) {
            return Err(DomainError::in_use("grade point state", id, "students"));
        }
        self.grade_point_states
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("grade point state", id))
    }

    // ------------------------------------------------------------------
    // Academic programs
    // ------------------------------------------------------------------

    pub fn save_academic_program(&mut self, program: AcademicProgram) -> Result<(), DomainError> {
        ensure_valid(&program)?;
        self.programs.insert(program.id, program);
        Ok(())
    }

    pub fn academic_program(&self, id: AcademicProgramId) -> Result<&AcademicProgram, DomainError> {
        self.programs
            .get(&id)
            .ok_or_else(|| DomainError::not_found("academic program", id))
    }

    pub fn academic_programs(&self) -> impl Iterator<Item = &AcademicProgram> {
        self.programs.values()
    }

    pub fn remove_academic_program(
        &mut self,
        id: AcademicProgramId,
    ) -> Result<AcademicProgram, DomainError> {
        self.academic_program(id)?;
        if has_links(&self.students_by_program, &id) {
            return Err(DomainError::in_use("academic program", id, "students"));
        }
        if has_links(&self.courses_by_program, &id) {
            return Err(DomainError::in_use("academic program", id, "courses"));
        }
        self.programs
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("academic program", id))
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    pub fn save_course(&mut self, course: Course) -> Result<(), DomainError> {
        ensure_valid(&course)?;
        if let Some(program_id) = course.academic_program_id {
            self.academic_program(program_id)?;
        }

        if let Some(previous) = self.courses.remove(&course.id)
            && let Some(program_id) = previous.academic_program_id
        {
            unlink(&mut self.courses_by_program, &program_id, &previous.id);
        }
        if let Some(program_id) = course.academic_program_id {
            link(&mut self.courses_by_program, program_id, course.id);
        }
        self.courses.insert(course.id, course);
        Ok(())
    }

    pub fn course(&self, id: CourseId) -> Result<&Course, DomainError> {
        self.courses
            .get(&id)
            .ok_or_else(|| DomainError::not_found("course", id))
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn remove_course(&mut self, id: CourseId) -> Result<Course, DomainError> {
        self.course(id)?;
        if has_links(&self.registrations_by_course, &id) {
            return Err(DomainError::in_use("course", id, "registrations"));
        }
        let course = self
            .courses
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("course", id))?;
        if let Some(program_id) = course.academic_program_id {
            unlink(&mut self.courses_by_program, &program_id, &course.id);
        }
        Ok(course)
    }

    // ------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------

    /// Insert or replace a student, keeping the program and state indexes current.
    pub fn save_student(&mut self, student: Student) -> Result<(), DomainError> {
        ensure_valid(&student)?;
        self.grade_point_state(student.grade_point_state_id)?;
        if let Some(program_id) = student.academic_program_id {
            self.academic_program(program_id)?;
        }
        if let Some(owner) = self.student_numbers.get(&student.student_number)
            && *owner != student.id
        {
            return Err(DomainError::Conflict(format!(
                "student number {} is already assigned",
                student.student_number
            )));
        }

        if let Some(previous) = self.students.remove(&student.id) {
            self.unindex_student(&previous);
        }
        self.student_numbers
            .insert(student.student_number, student.id);
        link(
            &mut self.students_by_state,
            student.grade_point_state_id,
            student.id,
        );
        if let Some(program_id) = student.academic_program_id {
            link(&mut self.students_by_program, program_id, student.id);
        }
        self.students.insert(student.id, student);
        Ok(())
    }

    fn unindex_student(&mut self, student: &Student) {
        self.student_numbers.remove(&student.student_number);
        unlink(
            &mut self.students_by_state,
            &student.grade_point_state_id,
            &student.id,
        );
        if let Some(program_id) = student.academic_program_id {
            unlink(&mut self.students_by_program, &program_id, &student.id);
        }
    }

    pub fn student(&self, id: StudentId) -> Result<&Student, DomainError> {
        self.students
            .get(&id)
            .ok_or_else(|| DomainError::not_found("student", id))
    }

    pub fn find_student_by_number(&self, student_number: i64) -> Option<&Student> {
        self.student_numbers
            .get(&student_number)
            .and_then(|id| self.students.get(id))
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn remove_student(&mut self, id: StudentId) -> Result<Student, DomainError> {
        self.student(id)?;
        if has_links(&self.registrations_by_student, &id) {
            return Err(DomainError::in_use("student", id, "registrations"));
        }
        let student = self
            .students
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("student", id))?;
        self.unindex_student(&student);
        Ok(student)
    }

    // ------------------------------------------------------------------
    // Registrations
    // ------------------------------------------------------------------

    pub fn save_registration(&mut self, registration: Registration) -> Result<(), DomainError> {
        ensure_valid(&registration)?;
        self.student(registration.student_id)?;
        let prior_attempts = self
            .registrations_by_student
            .get(&registration.student_id)
            .into_iter()
            .flatten()
            .filter(|id| **id != registration.id)
            .filter_map(|id| self.registrations.get(id))
            .filter(|existing| existing.course_id == registration.course_id)
            .count();
        self.course(registration.course_id)?
            .admit_registration(prior_attempts, registration.grade)?;
        if let Some(owner) = self
            .registration_numbers
            .get(&registration.registration_number)
            && *owner != registration.id
        {
            return Err(DomainError::Conflict(format!(
                "registration number {} is already assigned",
                registration.registration_number
            )));
        }

        if let Some(previous) = self.registrations.remove(&registration.id) {
            self.unindex_registration(&previous);
        }
        self.registration_numbers
            .insert(registration.registration_number, registration.id);
        link(
            &mut self.registrations_by_student,
            registration.student_id,
            registration.id,
        );
        link(
            &mut self.registrations_by_course,
            registration.course_id,
            registration.id,
        );
        self.registrations.insert(registration.id, registration);
        Ok(())
    }

    fn unindex_registration(&mut self, registration: &Registration) {
        self.registration_numbers
            .remove(&registration.registration_number);
        unlink(
            &mut self.registrations_by_student,
            &registration.student_id,
            &registration.id,
        );
        unlink(
            &mut self.registrations_by_course,
            &registration.course_id,
            &registration.id,
        );
    }

    pub fn registration(&self, id: RegistrationId) -> Result<&Registration, DomainError> {
        self.registrations
            .get(&id)
            .ok_or_else(|| DomainError::not_found("registration", id))
    }

    pub fn remove_registration(&mut self, id: RegistrationId) -> Result<Registration, DomainError> {
        let registration = self
            .registrations
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("registration", id))?;
        self.unindex_registration(&registration);
        Ok(registration)
    }

    /// One past the highest registration number in use.
    pub fn next_registration_number(&self) -> i64 {
        self.registration_numbers
            .keys()
            .max()
            .map_or(1, |highest| highest + 1)
    }

    // ------------------------------------------------------------------
    // Reverse lookups
    // ------------------------------------------------------------------

    /// Students in `program_id`, ordered by student number.
    pub fn students_in_program(&self, program_id: AcademicProgramId) -> Vec<&Student> {
        self.collect_students(self.students_by_program.get(&program_id))
    }

    /// Students currently in `state_id`, ordered by student number.
    pub fn students_in_state(&self, state_id: GradePointStateId) -> Vec<&Student> {
        self.collect_students(self.students_by_state.get(&state_id))
    }

    fn collect_students(&self, ids: Option<&HashSet<StudentId>>) -> Vec<&Student> {
        let mut students: Vec<&Student> = ids
            .into_iter()
            .flatten()
            .filter_map(|id| self.students.get(id))
            .collect();
        students.sort_by_key(|student| student.student_number);
        students
    }

    /// Courses offered by `program_id`, ordered by course number.
    pub fn courses_in_program(&self, program_id: AcademicProgramId) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self
            .courses_by_program
            .get(&program_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.courses.get(id))
            .collect();
        courses.sort_by(|a, b| a.course_number.cmp(&b.course_number));
        courses
    }

    /// Registrations held by `student_id`, ordered by registration number.
    pub fn registrations_for_student(&self, student_id: StudentId) -> Vec<&Registration> {
        self.collect_registrations(self.registrations_by_student.get(&student_id))
    }

    /// Registrations in `course_id`, ordered by registration number.
    pub fn registrations_for_course(&self, course_id: CourseId) -> Vec<&Registration> {
        self.collect_registrations(self.registrations_by_course.get(&course_id))
    }

    fn collect_registrations(&self, ids: Option<&HashSet<RegistrationId>>) -> Vec<&Registration> {
        let mut registrations: Vec<&Registration> = ids
            .into_iter()
            .flatten()
            .filter_map(|id| self.registrations.get(id))
            .collect();
        registrations.sort_by_key(|registration| registration.registration_number);
        registrations
    }

    /// How many times `student_id` has registered in `course_id`.
    pub fn attempts(&self, student_id: StudentId, course_id: CourseId) -> usize {
        self.registrations_by_student
            .get(&student_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.registrations.get(id))
            .filter(|registration| registration.course_id == course_id)
            .count()
    }
}
