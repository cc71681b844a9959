use super::common::*;
use crate::domain::{ApplicationStatus, WithdrawalStatus};
use crate::filter::InternshipFilter;
use crate::services::representative::RepresentativeDesk;
use crate::services::student::{StudentDesk, StudentError};

fn titles(internships: Vec<crate::domain::Internship>) -> Vec<String> {
    internships
        .into_iter()
        .map(|internship| internship.title)
        .collect()
}

#[test]
fn eligibility_follows_major_year_and_window() {
    let mut fixture = fixture();
    let senior = fixture.student(SENIOR);
    let junior = fixture.student(JUNIOR);
    let biologist = fixture.student(BIOLOGIST);
    let all = InternshipFilter::new();

    let desk = StudentDesk::new(&mut fixture.portal, senior);
    assert_eq!(
        titles(desk.eligible_internships(today(), &all)),
        vec!["Backend Intern", "Data Intern"]
    );

    let desk = StudentDesk::new(&mut fixture.portal, junior);
    assert_eq!(
        titles(desk.eligible_internships(today(), &all)),
        vec!["Backend Intern"]
    );

    // Lab Assistant matches the major but is still awaiting review.
    let desk = StudentDesk::new(&mut fixture.portal, biologist);
    assert!(desk.eligible_internships(today(), &all).is_empty());
}

#[test]
fn eligible_view_accepts_a_filter() {
    let mut fixture = fixture();
    let senior = fixture.student(SENIOR);
    let desk = StudentDesk::new(&mut fixture.portal, senior);

    let advanced = InternshipFilter::new().with_levels(["ADVANCED"]);
    assert_eq!(
        titles(desk.eligible_internships(today(), &advanced)),
        vec!["Data Intern"]
    );
}

#[test]
fn ineligible_applications_are_refused() {
    let mut fixture = fixture();
    let junior = fixture.student(JUNIOR);
    let biologist = fixture.student(BIOLOGIST);

    let mut desk = StudentDesk::new(&mut fixture.portal, junior);
    assert!(matches!(
        desk.apply(id(DATA), today()),
        Err(StudentError::LevelRestricted { level: "Advanced", year: 1 })
    ));
    assert!(matches!(
        desk.apply(id(CLOSED), today()),
        Err(StudentError::NotOpen { .. })
    ));

    let mut desk = StudentDesk::new(&mut fixture.portal, biologist);
    assert!(matches!(
        desk.apply(id(LAB), today()),
        Err(StudentError::NotListed(_))
    ));
    assert!(matches!(
        desk.apply(id(BACKEND), today()),
        Err(StudentError::MajorMismatch { .. })
    ));

    assert!(fixture.portal.applications().is_empty());
}

#[test]
fn application_is_recorded_once() {
    let mut fixture = fixture();
    let senior = fixture.student(SENIOR);

    {
        let mut desk = StudentDesk::new(&mut fixture.portal, senior);
        let application = desk.apply(id(BACKEND), today()).expect("applied");
        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.major, "Computer Science");
        assert_eq!(application.submitted_on, today());

        assert!(matches!(
            desk.apply(id(BACKEND), today()),
            Err(StudentError::AlreadyApplied(_))
        ));
        assert_eq!(desk.my_applications().len(), 1);
    }

    let reloaded = fixture.reload();
    let stored = reloaded.applications().group(&id(BACKEND));
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_id, SENIOR);
    assert_eq!(stored[0].status, ApplicationStatus::Pending);
}

#[test]
fn pending_application_limit_is_enforced() {
    let mut fixture = fixture();
    fixture.portal.policy.max_pending_applications = 1;
    let senior = fixture.student(SENIOR);

    let mut desk = StudentDesk::new(&mut fixture.portal, senior);
    desk.apply(id(BACKEND), today()).expect("first application");
    assert!(matches!(
        desk.apply(id(DATA), today()),
        Err(StudentError::ApplicationLimitReached { limit: 1 })
    ));
}

#[test]
fn placed_student_cannot_apply_again() {
    let mut fixture = fixture();
    let senior = fixture.student(SENIOR);
    let rep = fixture.representative(ACME);

    StudentDesk::new(&mut fixture.portal, senior.clone())
        .apply(id(BACKEND), today())
        .expect("applied");
    RepresentativeDesk::new(&mut fixture.portal, rep)
        .expect("approved rep")
        .decide_application(id(BACKEND), SENIOR, true)
        .expect("accepted");

    assert!(matches!(
        StudentDesk::new(&mut fixture.portal, senior).apply(id(DATA), today()),
        Err(StudentError::AlreadyPlaced)
    ));
}

#[test]
fn withdrawal_needs_an_application_and_is_not_repeated() {
    let mut fixture = fixture();
    let senior = fixture.student(SENIOR);
    let mut desk = StudentDesk::new(&mut fixture.portal, senior);

    assert!(matches!(
        desk.request_withdrawal(id(BACKEND), today()),
        Err(StudentError::NoApplication(_))
    ));

    desk.apply(id(BACKEND), today()).expect("applied");
    let withdrawal = desk
        .request_withdrawal(id(BACKEND), today())
        .expect("withdrawal requested");
    assert_eq!(withdrawal.status, WithdrawalStatus::Pending);
    assert_eq!(withdrawal.user_id, SENIOR);

    assert!(matches!(
        desk.request_withdrawal(id(BACKEND), today()),
        Err(StudentError::WithdrawalPending(_))
    ));
    let mine = desk.my_withdrawals();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].internship_id, id(BACKEND));

    let reloaded = fixture.reload();
    assert_eq!(reloaded.withdrawals().group(&id(BACKEND)).len(), 1);
}
