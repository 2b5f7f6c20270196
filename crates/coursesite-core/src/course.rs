//! Course record types.
//!
//! [`CourseRecord`] is the aggregate the editing surface owns. Every field
//! change goes through [`CourseRecord::apply`] so callers can track whether a
//! record is dirty.

use std::{collections::BTreeSet, fmt, str::FromStr};

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A string could not be parsed into one of the closed course enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseValueError {
    kind: &'static str,
    value: String,
}

impl ParseValueError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Academic subject codes offered by the department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subject {
    Ams,
    Bio,
    Che,
    Cse,
    Eco,
    Eng,
    Ise,
    Mat,
    Phy,
}

impl Subject {
    /// Every subject, in code order.
    pub const ALL: [Subject; 9] = [
        Self::Ams,
        Self::Bio,
        Self::Che,
        Self::Cse,
        Self::Eco,
        Self::Eng,
        Self::Ise,
        Self::Mat,
        Self::Phy,
    ];

    /// Three-letter upper-case code, e.g. `CSE`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ams => "AMS",
            Self::Bio => "BIO",
            Self::Che => "CHE",
            Self::Cse => "CSE",
            Self::Eco => "ECO",
            Self::Eng => "ENG",
            Self::Ise => "ISE",
            Self::Mat => "MAT",
            Self::Phy => "PHY",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Subject {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|subject| subject.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ParseValueError::new("subject", s))
    }
}

/// Term in which a course is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Semester {
    Fall,
    Spring,
    Winter,
    #[serde(alias = "Summer 1")]
    Summer1,
    #[serde(alias = "Summer 2")]
    Summer2,
    #[serde(rename = "SummerEXT", alias = "Summer EXT")]
    SummerExt,
}

impl Semester {
    /// Every semester, in the order the editing surface lists them.
    pub const ALL: [Semester; 6] = [
        Self::Fall,
        Self::Spring,
        Self::Winter,
        Self::Summer1,
        Self::Summer2,
        Self::SummerExt,
    ];

    /// Human-readable name, e.g. `Summer 1`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fall => "Fall",
            Self::Spring => "Spring",
            Self::Winter => "Winter",
            Self::Summer1 => "Summer 1",
            Self::Summer2 => "Summer 2",
            Self::SummerExt => "Summer EXT",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Semester {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "Summer 1", "summer1" and "SUMMER-1" all name the same term.
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|semester| {
                semester
                    .display_name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| ParseValueError::new("semester", s))
    }
}

/// A weekday on which lectures may be held. Weekends are not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LectureDay {
    #[serde(alias = "Mon")]
    Monday,
    #[serde(alias = "Tue")]
    Tuesday,
    #[serde(alias = "Wed")]
    Wednesday,
    #[serde(alias = "Thu")]
    Thursday,
    #[serde(alias = "Fri")]
    Friday,
}

impl LectureDay {
    /// Monday through Friday.
    pub const ALL: [LectureDay; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// The corresponding chrono weekday.
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
        }
    }

    /// Map a chrono weekday, returning `None` for Saturday and Sunday.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Self::Monday),
            Weekday::Tue => Some(Self::Tuesday),
            Weekday::Wed => Some(Self::Wednesday),
            Weekday::Thu => Some(Self::Thursday),
            Weekday::Fri => Some(Self::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// Full English name, e.g. `Wednesday`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
        }
    }
}

impl fmt::Display for LectureDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LectureDay {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Weekday>()
            .ok()
            .and_then(Self::from_weekday)
            .ok_or_else(|| ParseValueError::new("lecture day", s))
    }
}

/// One of the exportable page types.
///
/// Declaration order is the navigation order on every exported page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageType {
    Index,
    Syllabus,
    Schedule,
    #[serde(alias = "Hws")]
    Homeworks,
    Projects,
}

impl PageType {
    /// Every page type, in navigation order.
    pub const ALL: [PageType; 5] = [
        Self::Index,
        Self::Syllabus,
        Self::Schedule,
        Self::Homeworks,
        Self::Projects,
    ];

    /// Canonical file name inside the export directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Syllabus => "syllabus.html",
            Self::Schedule => "schedule.html",
            Self::Homeworks => "hws.html",
            Self::Projects => "projects.html",
        }
    }

    /// Label shown in the navigation bar.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Self::Index => "Home",
            Self::Syllabus => "Syllabus",
            Self::Schedule => "Schedule",
            Self::Homeworks => "HWs",
            Self::Projects => "Projects",
        }
    }

    /// Short identifier used in templates and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Syllabus => "syllabus",
            Self::Schedule => "schedule",
            Self::Homeworks => "hws",
            Self::Projects => "projects",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nav_label())
    }
}

impl FromStr for PageType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" | "home" => Ok(Self::Index),
            "syllabus" => Ok(Self::Syllabus),
            "schedule" => Ok(Self::Schedule),
            "hws" | "homeworks" => Ok(Self::Homeworks),
            "projects" => Ok(Self::Projects),
            _ => Err(ParseValueError::new("page type", s)),
        }
    }
}

/// Course instructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    /// Display name.
    pub name: String,

    /// Personal homepage, linked from the index and syllabus pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<String>,
}

/// Structured description of one course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub subject: Subject,
    pub number: u32,
    pub title: String,
    pub semester: Semester,
    pub year: i32,

    /// First day of the lecture range. Expected to be a Monday.
    pub starting_monday: NaiveDate,

    /// Last day of the lecture range. Expected to be a Friday.
    pub ending_friday: NaiveDate,

    #[serde(default)]
    pub lecture_days: BTreeSet<LectureDay>,

    #[serde(default)]
    pub enabled_pages: BTreeSet<PageType>,

    // Kept last so the TOML encoding places the table after plain values.
    #[serde(default)]
    pub instructor: Instructor,
}

impl CourseRecord {
    /// Create the record for a new course, relative to `today`.
    ///
    /// The lecture range covers the first full week starting on or after
    /// `today`, no lecture days are selected, and every page is enabled.
    pub fn new_for(today: NaiveDate) -> Self {
        let to_monday = (7 - today.weekday().num_days_from_monday()) % 7;
        let starting_monday = today + Days::new(u64::from(to_monday));

        Self {
            subject: Subject::Cse,
            number: 0,
            title: String::new(),
            semester: Semester::Fall,
            year: today.year(),
            starting_monday,
            ending_friday: starting_monday + Days::new(4),
            lecture_days: BTreeSet::new(),
            enabled_pages: PageType::ALL.into_iter().collect(),
            instructor: Instructor::default(),
        }
    }

    /// Years the editing surface offers: the current one and the next.
    pub fn year_options(today: NaiveDate) -> [i32; 2] {
        [today.year(), today.year() + 1]
    }

    /// Course code, e.g. `CSE 219`.
    pub fn code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Offering term, e.g. `Summer 1 2024`.
    pub fn term(&self) -> String {
        format!("{} {}", self.semester, self.year)
    }

    pub fn has_page(&self, page: PageType) -> bool {
        self.enabled_pages.contains(&page)
    }

    pub fn has_lecture_day(&self, day: LectureDay) -> bool {
        self.lecture_days.contains(&day)
    }

    /// Apply a single field change. Returns `true` if the record changed.
    pub fn apply(&mut self, edit: CourseEdit) -> bool {
        match edit {
            CourseEdit::Subject(subject) => replace(&mut self.subject, subject),
            CourseEdit::Number(number) => replace(&mut self.number, number),
            CourseEdit::Title(title) => replace(&mut self.title, title),
            CourseEdit::InstructorName(name) => replace(&mut self.instructor.name, name),
            CourseEdit::InstructorHomepage(url) => {
                let url = url.filter(|u| !u.trim().is_empty());
                replace(&mut self.instructor.homepage_url, url)
            }
            CourseEdit::Semester(semester) => replace(&mut self.semester, semester),
            CourseEdit::Year(year) => replace(&mut self.year, year),
            CourseEdit::StartingMonday(date) => replace(&mut self.starting_monday, date),
            CourseEdit::EndingFriday(date) => replace(&mut self.ending_friday, date),
            CourseEdit::LectureDay(day, true) => self.lecture_days.insert(day),
            CourseEdit::LectureDay(day, false) => self.lecture_days.remove(&day),
            CourseEdit::Page(page, true) => self.enabled_pages.insert(page),
            CourseEdit::Page(page, false) => self.enabled_pages.remove(&page),
        }
    }

    /// Apply a batch of field changes in order.
    ///
    /// Returns how many of them actually changed the record.
    pub fn apply_edits(&mut self, edits: impl IntoIterator<Item = CourseEdit>) -> usize {
        edits
            .into_iter()
            .map(|edit| self.apply(edit))
            .filter(|changed| *changed)
            .count()
    }
}

impl Default for CourseRecord {
    fn default() -> Self {
        Self::new_for(chrono::Local::now().date_naive())
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// A discrete change to one field of a [`CourseRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseEdit {
    Subject(Subject),
    Number(u32),
    Title(String),
    InstructorName(String),
    /// `None` or a blank URL clears the homepage.
    InstructorHomepage(Option<String>),
    Semester(Semester),
    Year(i32),
    StartingMonday(NaiveDate),
    EndingFriday(NaiveDate),
    /// Select (`true`) or deselect a lecture day.
    LectureDay(LectureDay, bool),
    /// Enable (`true`) or disable a page type.
    Page(PageType, bool),
}
