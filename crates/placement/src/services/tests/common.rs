use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;
use uuid::Uuid;

use crate::config::{DataConfig, PlacementPolicy};
use crate::domain::{CareerCenterStaff, CompanyRepresentative, Student};
use crate::portal::Portal;

pub(super) const BACKEND: &str = "11111111-1111-4111-8111-111111111111";
pub(super) const DATA: &str = "22222222-2222-4222-8222-222222222222";
pub(super) const LAB: &str = "33333333-3333-4333-8333-333333333333";
pub(super) const CLOSED: &str = "44444444-4444-4444-8444-444444444444";

pub(super) const SENIOR: &str = "U2310001A";
pub(super) const JUNIOR: &str = "U2310002B";
pub(super) const BIOLOGIST: &str = "U2310003C";
pub(super) const STAFF: &str = "sng001";
pub(super) const ACME: &str = "hr@acme.test";
pub(super) const GLOBEX: &str = "jobs@globex.test";
pub(super) const INITECH: &str = "ops@initech.test";

const STUDENTS: &str = "\
StudentID,Name,Major,Year,Email,Password
U2310001A,Tan Wei,Computer Science,3,tanwei@uni.test,pw1
U2310002B,Lim Mei,Computer Science,1,limmei@uni.test,
U2310003C,Ong Kai,Biology,4,ongkai@uni.test,pw3
";

const STAFF_ROWS: &str = "\
StaffID,Name,Role,Department,Email,Password
sng001,Dr. Sng,Career Center Staff,CCDS,sng@uni.test,staffpw
";

const REPRESENTATIVES: &str = "\
CompanyRepID,Name,CompanyName,Department,Position,Email,Status,Password
hr@acme.test,Hana,Acme,HR,Lead,hr@acme.test,Approved,acmepw
jobs@globex.test,Gus,Globex,Talent,Recruiter,jobs@globex.test,Pending,globexpw
ops@initech.test,Ivy,Initech,Ops,Manager,ops@initech.test,Rejected,initechpw
";

const INTERNSHIPS: &str = "\
UUID,Title,Description,Level,PreferredMajor,OpeningDate,ClosingDate,Status,CompanyName,Representatives,NumberOfSlots,Visibility
11111111-1111-4111-8111-111111111111,Backend Intern,\"APIs, queues, and tests\",Basic,Computer Science,2025-01-01,2025-12-31,Approved,Acme,hr@acme.test,2,true
22222222-2222-4222-8222-222222222222,Data Intern,Pipelines,Advanced,Computer Science,2025-01-01,2025-12-31,Approved,Acme,hr@acme.test,1,true
33333333-3333-4333-8333-333333333333,Lab Assistant,Bench work,Basic,Biology,2025-01-01,2025-12-31,Pending,Globex,jobs@globex.test,3,false
44444444-4444-4444-8444-444444444444,Closed Role,Expired,Basic,Computer Science,2024-01-01,2024-12-31,Approved,Acme,hr@acme.test,1,true
";

const SUBMISSION_HEADER: &str = "UUID,UserId,Name,Email,Major,Year,SubmittedDate,Status\n";

pub(super) struct Fixture {
    pub(super) dir: TempDir,
    pub(super) portal: Portal,
}

impl Fixture {
    pub(super) fn data_config(&self) -> DataConfig {
        DataConfig::new(self.dir.path())
    }

    /// Reopen the portal from disk, as a new session would.
    pub(super) fn reload(&self) -> Portal {
        Portal::open(&self.data_config(), PlacementPolicy::default()).expect("portal reloads")
    }

    pub(super) fn student(&self, id: &str) -> Student {
        self.portal
            .students()
            .get(id)
            .cloned()
            .expect("fixture student")
    }

    pub(super) fn staff(&self) -> CareerCenterStaff {
        self.portal
            .staff()
            .get(STAFF)
            .cloned()
            .expect("fixture staff")
    }

    pub(super) fn representative(&self, id: &str) -> CompanyRepresentative {
        self.portal
            .representatives()
            .get(id)
            .cloned()
            .expect("fixture representative")
    }
}

pub(super) fn fixture() -> Fixture {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DataConfig::new(dir.path());

    fs::write(config.students_path(), STUDENTS).expect("students");
    fs::write(config.staff_path(), STAFF_ROWS).expect("staff");
    fs::write(config.representatives_path(), REPRESENTATIVES).expect("representatives");
    fs::write(config.internships_path(), INTERNSHIPS).expect("internships");
    fs::write(config.applications_path(), SUBMISSION_HEADER).expect("applications");
    fs::write(config.withdrawals_path(), SUBMISSION_HEADER).expect("withdrawals");

    let portal = Portal::open(&config, PlacementPolicy::default()).expect("portal opens");
    Fixture { dir, portal }
}

pub(super) fn id(value: &str) -> Uuid {
    Uuid::parse_str(value).expect("fixture uuid")
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}
