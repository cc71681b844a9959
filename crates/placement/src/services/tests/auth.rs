use super::common::*;
use crate::domain::{RepresentativeStatus, Role, User};
use crate::services::auth::{
    change_password, login, register_representative, AuthError, RegistrationRequest,
};

fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest {
        email: email.to_string(),
        name: "Wen".to_string(),
        password: "hooli-pw".to_string(),
        company_name: "Hooli".to_string(),
        department: "Engineering".to_string(),
        position: "Manager".to_string(),
    }
}

#[test]
fn login_dispatches_on_the_account_kind() {
    let fixture = fixture();

    let student = login(&fixture.portal, SENIOR, "pw1").expect("student signs in");
    assert_eq!(student.role(), Role::Student);
    assert!(matches!(student, User::Student(_)));

    let staff = login(&fixture.portal, STAFF, "staffpw").expect("staff signs in");
    assert_eq!(staff.role(), Role::Staff);

    let rep = login(&fixture.portal, ACME, "acmepw").expect("approved rep signs in");
    assert_eq!(rep.role(), Role::Representative);
    assert_eq!(rep.name(), "Hana");
}

#[test]
fn blank_password_column_means_default_password() {
    let fixture = fixture();
    let user = login(&fixture.portal, JUNIOR, "password").expect("default password works");
    assert_eq!(user.id(), JUNIOR);
}

#[test]
fn login_rejects_bad_credentials() {
    let fixture = fixture();

    assert!(matches!(
        login(&fixture.portal, SENIOR, "wrong"),
        Err(AuthError::InvalidPassword)
    ));
    match login(&fixture.portal, "nobody", "pw") {
        Err(AuthError::UnknownUser(id)) => assert_eq!(id, "nobody"),
        other => panic!("expected unknown user, got {other:?}"),
    }
}

#[test]
fn unapproved_representatives_cannot_sign_in() {
    let fixture = fixture();

    assert!(matches!(
        login(&fixture.portal, GLOBEX, "globexpw"),
        Err(AuthError::PendingApproval(_))
    ));
    assert!(matches!(
        login(&fixture.portal, INITECH, "initechpw"),
        Err(AuthError::Rejected(_))
    ));
}

#[test]
fn registration_creates_a_pending_representative() {
    let mut fixture = fixture();

    let rep = register_representative(&mut fixture.portal, registration(" wen@hooli.test "))
        .expect("registration succeeds");
    assert_eq!(rep.id, "wen@hooli.test");
    assert_eq!(rep.status, RepresentativeStatus::Pending);

    let reloaded = fixture.reload();
    let stored = reloaded
        .representatives()
        .get("wen@hooli.test")
        .expect("persisted");
    assert_eq!(stored.company_name, "Hooli");
    assert_eq!(stored.password, "hooli-pw");
    assert!(matches!(
        login(&reloaded, "wen@hooli.test", "hooli-pw"),
        Err(AuthError::PendingApproval(_))
    ));
}

#[test]
fn registration_rejects_duplicates_and_bad_input() {
    let mut fixture = fixture();

    assert!(matches!(
        register_representative(&mut fixture.portal, registration(ACME)),
        Err(AuthError::AlreadyRegistered(_))
    ));
    assert!(matches!(
        register_representative(&mut fixture.portal, registration("not-an-email")),
        Err(AuthError::InvalidRegistration(_))
    ));

    let mut blank_password = registration("new@hooli.test");
    blank_password.password = "  ".to_string();
    assert!(matches!(
        register_representative(&mut fixture.portal, blank_password),
        Err(AuthError::BlankPassword)
    ));
    assert_eq!(fixture.portal.representatives().len(), 3);
}

#[test]
fn password_change_is_persisted() {
    let mut fixture = fixture();
    let mut user = login(&fixture.portal, SENIOR, "pw1").expect("signs in");

    change_password(&mut fixture.portal, &mut user, "n3w-pass").expect("password changes");
    assert!(matches!(&user, User::Student(student) if student.password == "n3w-pass"));

    let reloaded = fixture.reload();
    assert!(login(&reloaded, SENIOR, "n3w-pass").is_ok());
    assert!(matches!(
        login(&reloaded, SENIOR, "pw1"),
        Err(AuthError::InvalidPassword)
    ));

    assert!(matches!(
        change_password(&mut fixture.portal, &mut user, ""),
        Err(AuthError::BlankPassword)
    ));
}
