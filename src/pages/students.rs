//! Student roster with search and filters.

use crate::consts::cli_consts::filters::{DEPARTMENTS, YEARS};
use crate::filter::{FilteredView, RecordFilter, Selection, contains_ignore_case};
use crate::models::{Student, StudentStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Matched against name, roll number and email.
    pub search: String,
    pub department: Selection<String>,
    pub year: Selection<String>,
    pub status: Selection<StudentStatus>,
}

impl RecordFilter<Student> for StudentFilter {
    fn matches(&self, student: &Student) -> bool {
        let search = self.search.as_str();
        let found = search.is_empty()
            || contains_ignore_case(&student.name, search)
            || contains_ignore_case(&student.roll_no, search)
            || contains_ignore_case(&student.email, search);
        found
            && self.department.matches(&student.department)
            && self.year.matches(&student.year)
            && self.status.matches(&student.status)
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, strum::Display)]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

#[derive(Debug, Clone)]
pub struct StudentsController {
    roster: FilteredView<Student, StudentFilter>,
    view_mode: ViewMode,
}

impl StudentsController {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            roster: FilteredView::new(students, StudentFilter::default()),
            view_mode: ViewMode::default(),
        }
    }

    pub fn filter(&self) -> &StudentFilter {
        self.roster.filter()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Student> {
        self.roster.visible()
    }

    pub fn visible_len(&self) -> usize {
        self.roster.visible_len()
    }

    pub fn total(&self) -> usize {
        self.roster.len()
    }

    /// Times the roster has been filtered, for checking memoization.
    pub fn derivations(&self) -> usize {
        self.roster.derivations()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_search(&mut self, search: &str) -> bool {
        self.roster.update_filter(|f| f.search = search.to_string())
    }

    pub fn push_search_char(&mut self, c: char) -> bool {
        self.roster.update_filter(|f| f.search.push(c))
    }

    pub fn pop_search_char(&mut self) -> bool {
        self.roster.update_filter(|f| {
            f.search.pop();
        })
    }

    pub fn set_department(&mut self, department: Selection<String>) -> bool {
        self.roster.update_filter(|f| f.department = department)
    }

    pub fn set_year(&mut self, year: Selection<String>) -> bool {
        self.roster.update_filter(|f| f.year = year)
    }

    pub fn set_status(&mut self, status: Selection<StudentStatus>) -> bool {
        self.roster.update_filter(|f| f.status = status)
    }

    pub fn cycle_department(&mut self) -> bool {
        let options = owned(&DEPARTMENTS);
        self.roster
            .update_filter(|f| f.department = f.department.cycle(&options))
    }

    pub fn cycle_year(&mut self) -> bool {
        let options = owned(&YEARS);
        self.roster.update_filter(|f| f.year = f.year.cycle(&options))
    }

    pub fn cycle_status(&mut self) -> bool {
        self.roster
            .update_filter(|f| f.status = f.status.cycle(&StudentStatus::ALL))
    }

    pub fn clear_filters(&mut self) -> bool {
        self.roster.set_filter(StudentFilter::default())
    }

    pub fn toggle_view_mode(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Table => ViewMode::Grid,
            ViewMode::Grid => ViewMode::Table,
        };
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// "Showing 3 of 8 students"
    pub fn summary_line(&self) -> String {
        format!(
            "Showing {} of {} students",
            self.visible_len(),
            self.total()
        )
    }
}

fn owned(options: &[&str]) -> Vec<String> {
    options.iter().map(|option| option.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Dataset;

    fn controller() -> StudentsController {
        StudentsController::new(Dataset::builtin().unwrap().students)
    }

    fn roll_numbers(students: &StudentsController) -> Vec<&str> {
        students.visible().map(|s| s.roll_no.as_str()).collect()
    }

    #[test]
    fn default_filter_shows_everyone() {
        let students = controller();
        assert_eq!(students.visible_len(), 8);
        assert_eq!(students.summary_line(), "Showing 8 of 8 students");
        assert_eq!(students.view_mode(), ViewMode::Table);
    }

    #[test]
    fn search_matches_roll_number_case_insensitively() {
        let mut students = controller();
        students.set_search("cs20");
        assert_eq!(roll_numbers(&students), vec!["CS2021001", "CS2023012", "CS2020089"]);
    }

    #[test]
    fn search_matches_name_and_email() {
        let mut students = controller();
        students.set_search("PATEL");
        assert_eq!(roll_numbers(&students), vec!["EC2022045"]);

        students.set_search("kavya.nair@");
        assert_eq!(roll_numbers(&students), vec!["EC2021067"]);
    }

    #[test]
    fn filters_are_combined() {
        let mut students = controller();
        students.set_department(Selection::Only("Computer Science".to_string()));
        students.set_status(Selection::Only(StudentStatus::Active));
        assert_eq!(roll_numbers(&students), vec!["CS2021001", "CS2023012"]);

        students.set_year(Selection::Only("1st Year".to_string()));
        assert_eq!(roll_numbers(&students), vec!["CS2023012"]);

        students.set_search("arjun");
        assert_eq!(students.visible_len(), 0);
        assert_eq!(students.summary_line(), "Showing 0 of 8 students");
    }

    #[test]
    fn typing_edits_the_search() {
        let mut students = controller();
        for c in "ravi".chars() {
            students.push_search_char(c);
        }
        assert_eq!(roll_numbers(&students), vec!["ME2022056"]);
        students.pop_search_char();
        assert_eq!(students.filter().search, "rav");
    }

    #[test]
    fn cycling_walks_options_then_returns_to_all() {
        let mut students = controller();
        students.cycle_department();
        assert_eq!(
            students.filter().department,
            Selection::Only("Computer Science".to_string())
        );
        for _ in 0..4 {
            students.cycle_department();
        }
        assert!(students.filter().department.is_all());

        students.cycle_status();
        students.cycle_status();
        assert_eq!(students.filter().status, Selection::Only(StudentStatus::Inactive));
        assert_eq!(roll_numbers(&students), vec!["ME2022056"]);

        students.cycle_year();
        assert_eq!(students.filter().year, Selection::Only("1st Year".to_string()));
    }

    #[test]
    fn unchanged_filter_does_not_rederive() {
        let mut students = controller();
        let initial = students.derivations();

        assert!(!students.set_search(""));
        assert!(!students.clear_filters());
        assert_eq!(students.derivations(), initial);

        assert!(students.set_search("cs"));
        assert!(!students.set_search("cs"));
        assert_eq!(students.derivations(), initial + 1);

        assert!(students.clear_filters());
        assert_eq!(students.visible_len(), 8);
    }

    #[test]
    fn view_mode_toggles() {
        let mut students = controller();
        let before = students.derivations();
        students.toggle_view_mode();
        assert_eq!(students.view_mode(), ViewMode::Grid);
        students.toggle_view_mode();
        assert_eq!(students.view_mode(), ViewMode::Table);
        assert_eq!(students.derivations(), before);
    }

    fn selections(options: &[&str]) -> Vec<Selection<String>> {
        std::iter::once(Selection::All)
            .chain(options.iter().map(|o| Selection::Only(o.to_string())))
            .collect()
    }

    #[test]
    fn every_filter_combination_is_an_ordered_subset() {
        let all = Dataset::builtin().unwrap().students;
        let statuses: Vec<Selection<StudentStatus>> = std::iter::once(Selection::All)
            .chain(StudentStatus::ALL.into_iter().map(Selection::Only))
            .collect();
        let mut students = StudentsController::new(all.clone());

        for search in ["", "cs20", "PATEL", "@college.edu", "zzz"] {
            for department in selections(&DEPARTMENTS) {
                for year in selections(&YEARS) {
                    for status in &statuses {
                        students.set_search(search);
                        students.set_department(department.clone());
                        students.set_year(year.clone());
                        students.set_status(status.clone());

                        let needle = search.to_lowercase();
                        let expected: Vec<&Student> = all
                            .iter()
                            .filter(|s| {
                                (s.name.to_lowercase().contains(&needle)
                                    || s.roll_no.to_lowercase().contains(&needle)
                                    || s.email.to_lowercase().contains(&needle))
                                    && department.matches(&s.department)
                                    && year.matches(&s.year)
                                    && status.matches(&s.status)
                            })
                            .collect();
                        let visible: Vec<&Student> = students.visible().collect();
                        assert_eq!(
                            visible, expected,
                            "search {search:?}, {department:?}, {year:?}, {status:?}"
                        );
                    }
                }
            }
        }

        students.set_search("");
        students.set_department(Selection::All);
        students.set_year(Selection::All);
        students.set_status(Selection::All);
        assert!(students.visible().eq(all.iter()));
    }
}
