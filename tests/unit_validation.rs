use bitcollege::models::{
    AcademicProgram, GradePointStateId, NewAcademicProgram, Student, UpdateStudent,
};
use bitcollege::Money;
use bitcollege_core::validate;

mod common;

use common::new_student;

fn student_with(province: &str, student_number: i64) -> Result<Student, bitcollege::DomainError> {
    let mut dto = new_student(GradePointStateId::new(), None, student_number, Some(3.0));
    dto.province = province.to_string();
    Student::new(dto)
}

#[test]
fn test_province_must_be_a_canadian_code() {
    let err = student_with("XX", 10_000_001).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.violations()[0].field, "province");
    assert_eq!(err.violations()[0].rule, "regex");

    assert!(student_with("ON", 10_000_001).is_ok());
}

#[test]
fn test_every_province_and_territory_is_accepted() {
    for code in [
        "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
    ] {
        assert!(student_with(code, 10_000_001).is_ok(), "{}", code);
    }
    for code in ["on", "ONT", "ON ", "", "QB"] {
        assert!(student_with(code, 10_000_001).is_err(), "{:?}", code);
    }
}

#[test]
fn test_student_number_must_have_eight_digits() {
    let err = student_with("ON", 123).unwrap_err();
    assert_eq!(err.violations()[0].field, "student_number");
    assert_eq!(err.violations()[0].rule, "range");

    assert!(student_with("ON", 10_000_000).is_ok());
    assert!(student_with("ON", 99_999_999).is_ok());
    assert!(student_with("ON", 100_000_000).is_err());
}

#[test]
fn test_all_violations_are_reported_together() {
    let mut dto = new_student(GradePointStateId::new(), None, 123, Some(5.0));
    dto.province = "XX".to_string();
    dto.first_name = String::new();

    let err = Student::new(dto).unwrap_err();
    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(
        fields,
        vec![
            "first_name",
            "grade_point_average",
            "province",
            "student_number"
        ]
    );
}

#[test]
fn test_failed_update_leaves_student_untouched() {
    let mut student = student_with("ON", 10_000_001).unwrap();
    let before = student.clone();

    let err = student
        .apply_update(UpdateStudent {
            city: Some("Winnipeg".to_string()),
            outstanding_fees: Some(Money::from_cents(-1)),
            ..Default::default()
        })
        .unwrap_err();

    assert_eq!(err.violations()[0].rule, "non_negative");
    assert_eq!(student, before);
}

#[test]
fn test_loaded_records_are_checked_by_validate() {
    let mut student = student_with("ON", 10_000_001).unwrap();
    student.province = "XX".to_string();
    student.city = String::new();

    let violations = validate(&student);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].field, "city");
    assert_eq!(violations[1].field, "province");
}

#[test]
fn test_full_name_and_address() {
    let mut student = student_with("MB", 10_000_001).unwrap();
    student.first_name = "Ada".to_string();
    student.last_name = "Lovelace".to_string();
    student.address = "160 Princess St".to_string();
    student.city = "Winnipeg".to_string();

    assert_eq!(student.full_name(), "Ada Lovelace");
    assert_eq!(student.full_address(), "160 Princess St Winnipeg MB");
}

#[test]
fn test_program_requires_acronym_and_description() {
    let err = AcademicProgram::new(NewAcademicProgram {
        program_acronym: String::new(),
        description: String::new(),
    })
    .unwrap_err();
    assert_eq!(err.violations().len(), 2);
    assert_eq!(
        err.to_string(),
        "description is required, program_acronym is required"
    );
}
