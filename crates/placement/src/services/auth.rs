use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{CompanyRepresentative, RepresentativeStatus, User};
use crate::portal::Portal;
use crate::storage::StoreError;

/// Details supplied by a company representative signing up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub company_name: String,
    pub department: String,
    pub position: String,
}

/// Error raised by sign-in, registration, and password changes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no account with id {0}")]
    UnknownUser(String),
    #[error("incorrect password")]
    InvalidPassword,
    #[error("registration for {0} is still awaiting approval")]
    PendingApproval(String),
    #[error("registration for {0} was rejected")]
    Rejected(String),
    #[error("{0} is already registered")]
    AlreadyRegistered(String),
    #[error("invalid registration: {0}")]
    InvalidRegistration(&'static str),
    #[error("password must not be blank")]
    BlankPassword,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Sign in with a plaintext id/password pair.
///
/// Students are checked first, then staff, then company representatives.
/// Representatives may only sign in once their registration is approved.
pub fn login(portal: &Portal, user_id: &str, password: &str) -> Result<User, AuthError> {
    let user_id = user_id.trim();

    let (user, stored_password) = if let Some(student) = portal.students.get(user_id) {
        (User::Student(student.clone()), student.password.as_str())
    } else if let Some(staff) = portal.staff.get(user_id) {
        (User::Staff(staff.clone()), staff.password.as_str())
    } else if let Some(rep) = portal.representatives.get(user_id) {
        (User::Representative(rep.clone()), rep.password.as_str())
    } else {
        warn!(user_id, "login for unknown account");
        return Err(AuthError::UnknownUser(user_id.to_string()));
    };

    if stored_password != password {
        warn!(user_id, "login with incorrect password");
        return Err(AuthError::InvalidPassword);
    }

    if let User::Representative(rep) = &user {
        match rep.status {
            RepresentativeStatus::Approved => {}
            RepresentativeStatus::Pending => {
                return Err(AuthError::PendingApproval(rep.id.clone()))
            }
            RepresentativeStatus::Rejected => return Err(AuthError::Rejected(rep.id.clone())),
        }
    }

    info!(user_id, role = user.role().label(), "user signed in");
    Ok(user)
}

/// Register a company representative. The account starts out pending.
pub fn register_representative(
    portal: &mut Portal,
    request: RegistrationRequest,
) -> Result<CompanyRepresentative, AuthError> {
    let RegistrationRequest {
        email,
        name,
        password,
        company_name,
        department,
        position,
    } = request;

    let email = email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidRegistration("email must be a valid address"));
    }
    if name.trim().is_empty() {
        return Err(AuthError::InvalidRegistration("name must not be blank"));
    }
    if company_name.trim().is_empty() {
        return Err(AuthError::InvalidRegistration("company name must not be blank"));
    }
    if password.trim().is_empty() {
        return Err(AuthError::BlankPassword);
    }

    if portal.representatives.contains(email.as_str())
        || portal.students.contains(email.as_str())
        || portal.staff.contains(email.as_str())
    {
        return Err(AuthError::AlreadyRegistered(email));
    }

    let representative = CompanyRepresentative {
        id: email.clone(),
        name: name.trim().to_string(),
        password,
        email,
        company_name: company_name.trim().to_string(),
        department: department.trim().to_string(),
        position: position.trim().to_string(),
        status: RepresentativeStatus::Pending,
    };

    portal.representatives.insert(representative.clone())?;
    info!(
        representative = %representative.id,
        company = %representative.company_name,
        "representative registered"
    );
    Ok(representative)
}

/// Replace the password of `user` and persist it to the owning file.
pub fn change_password(
    portal: &mut Portal,
    user: &mut User,
    new_password: &str,
) -> Result<(), AuthError> {
    if new_password.trim().is_empty() {
        return Err(AuthError::BlankPassword);
    }

    let replace = |password: &mut String| *password = new_password.to_string();
    match user {
        User::Student(student) => {
            portal
                .students
                .update(student.id.as_str(), |s| replace(&mut s.password))?;
        }
        User::Staff(staff) => {
            portal
                .staff
                .update(staff.id.as_str(), |s| replace(&mut s.password))?;
        }
        User::Representative(rep) => {
            portal
                .representatives
                .update(rep.id.as_str(), |r| replace(&mut r.password))?;
        }
    }

    user.set_password(new_password);
    info!(user_id = user.id(), "password changed");
    Ok(())
}
