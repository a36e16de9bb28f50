//! Deterministic Java skeletons rendered from the embedded templates

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::utils::to_lower_camel_case;
use crate::generation::errors::GenerationError;
use crate::generation::pages::ScenarioCategory;
use crate::generation::plan::{ClassPlan, ClassScenario, PagePlan};
use crate::generation::templates::{self, BASE_PAGE, BASE_TEST, PAGE_CLASS, TEST_CLASS};
use crate::generation::traits::GenerationBackend;
use crate::generation::types::{BackendKind, GenerationRequest, GenerationSettings, Synthesis};

const WAIT_SECONDS: u64 = 10;

/// Test data keys that carry patient search criteria, in lookup order
const SEARCH_KEYS: [&str; 5] = ["patient", "patient name", "criteria", "search", "name"];
const MESSAGE_KEYS: [&str; 2] = ["message", "text"];

#[derive(Debug, Clone, Copy, Serialize)]
struct Locator {
    field: &'static str,
    strategy: &'static str,
    value: &'static str,
}

const fn locator(field: &'static str, strategy: &'static str, value: &'static str) -> Locator {
    Locator {
        field,
        strategy,
        value,
    }
}

const LOGIN_LOCATORS: [Locator; 3] = [
    locator("usernameField", "id", "cmusername"),
    locator("passwordField", "id", "cmpassword"),
    locator(
        "loginButton",
        "xpath",
        "//button[@type='submit' and contains(@class,'btn-primary')]",
    ),
];

const PATIENT_SEARCH_LOCATORS: [Locator; 3] = [
    locator("searchCriteriaField", "id", "NameSearch"),
    locator(
        "searchButton",
        "xpath",
        "//span[contains(text(),'Search') or @data-localize='Main.Search']",
    ),
    locator("searchResults", "id", "search-results"),
];

const MESSAGE_LOCATORS: [Locator; 4] = [
    locator("messagesLink", "xpath", "//a[text()='Messages']"),
    locator("messageInput", "name", "messageBody"),
    locator("sendButton", "xpath", "//button[contains(text(),'Send')]"),
    locator("messageList", "id", "message-list"),
];

fn locators_for(category: ScenarioCategory) -> &'static [Locator] {
    match category {
        ScenarioCategory::Login => &LOGIN_LOCATORS,
        ScenarioCategory::PatientSearch => &PATIENT_SEARCH_LOCATORS,
        ScenarioCategory::Messaging | ScenarioCategory::Navigation => &MESSAGE_LOCATORS,
    }
}

#[derive(Serialize)]
struct ScenarioRef<'a> {
    id: &'a str,
    summary: &'a str,
}

#[derive(Serialize)]
struct PageView<'a> {
    package: &'a str,
    name: &'a str,
    scenarios: Vec<ScenarioRef<'a>>,
    locators: Vec<Locator>,
    login: bool,
    open_url: Option<&'a str>,
    patient_search: bool,
    messaging: bool,
}

#[derive(Serialize)]
struct PageVar {
    class: String,
    var: String,
}

#[derive(Serialize)]
struct VarRef {
    var: String,
}

#[derive(Serialize)]
struct LoginCall {
    var: String,
    username: String,
    password: String,
}

#[derive(Serialize)]
struct TextCall {
    var: String,
    text: String,
}

#[derive(Serialize, PartialEq)]
struct Check {
    var: String,
    method: &'static str,
}

#[derive(Serialize)]
struct MethodView<'a> {
    id: &'a str,
    summary: &'a str,
    description: String,
    priority: usize,
    name: &'a str,
    preconditions: &'a str,
    steps: &'a [String],
    pages: Vec<PageVar>,
    url: Option<String>,
    open: Option<VarRef>,
    login: Option<LoginCall>,
    search: Option<TextCall>,
    message: Option<TextCall>,
    navigate: Option<VarRef>,
    checks: Vec<Check>,
    expected: &'a str,
}

#[derive(Serialize)]
struct TestClassView<'a> {
    package: &'a str,
    pages_package: &'a str,
    name: &'a str,
    pages: BTreeSet<&'a str>,
    methods: Vec<MethodView<'a>>,
}

/// Local variable holding an instance of `page`
fn page_var(page: &str) -> String {
    to_lower_camel_case(page)
}

/// Renders every request from templates; never touches the network
#[derive(Debug, Clone)]
pub struct TemplateBackend {
    settings: GenerationSettings,
}

impl TemplateBackend {
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Render a request, surfacing template errors
    pub fn render(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError> {
        match request {
            GenerationRequest::Page(page) => self.render_page(page),
            GenerationRequest::TestClass(class) => self.render_test_class(class),
            GenerationRequest::BasePage => templates::render(
                BASE_PAGE,
                &serde_json::json!({
                    "package": self.settings.pages_package,
                    "wait_seconds": WAIT_SECONDS,
                }),
            ),
            GenerationRequest::BaseTest => templates::render(
                BASE_TEST,
                &serde_json::json!({ "package": self.settings.tests_package }),
            ),
        }
    }

    /// Render a request; a template failure yields a minimal skeleton
    pub fn synthesize(&self, request: GenerationRequest<'_>) -> String {
        match self.render(request) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    class = request.class_name(),
                    error = %e,
                    "Template rendering failed; emitting minimal skeleton"
                );
                self.minimal_skeleton(request)
            }
        }
    }

    fn render_page(&self, page: &PagePlan) -> Result<String, GenerationError> {
        let mut locators: Vec<Locator> = Vec::new();
        for category in &page.categories {
            for locator in locators_for(*category) {
                if !locators.iter().any(|l| l.field == locator.field) {
                    locators.push(*locator);
                }
            }
        }

        let login = page.has(ScenarioCategory::Login);
        let view = PageView {
            package: &self.settings.pages_package,
            name: &page.name,
            scenarios: page
                .specs
                .iter()
                .map(|spec| ScenarioRef {
                    id: &spec.id,
                    summary: &spec.summary,
                })
                .collect(),
            locators,
            login,
            open_url: if login {
                self.settings.login_url.as_deref()
            } else {
                None
            },
            patient_search: page.has(ScenarioCategory::PatientSearch),
            messaging: page.has(ScenarioCategory::Messaging)
                || page.has(ScenarioCategory::Navigation),
        };

        templates::render(PAGE_CLASS, &view)
    }

    fn render_test_class(&self, class: &ClassPlan) -> Result<String, GenerationError> {
        let view = TestClassView {
            package: &self.settings.tests_package,
            pages_package: &self.settings.pages_package,
            name: &class.name,
            pages: class.pages(),
            methods: class
                .scenarios
                .iter()
                .enumerate()
                .map(|(index, scenario)| self.method_view(class, scenario, index + 1))
                .collect(),
        };

        templates::render(TEST_CLASS, &view)
    }

    fn method_view<'a>(
        &self,
        class: &ClassPlan,
        scenario: &'a ClassScenario,
        priority: usize,
    ) -> MethodView<'a> {
        let spec = &scenario.spec;
        let var_for = |category| class.page_for(category).map(page_var);

        let login = var_for(ScenarioCategory::Login).map(|var| LoginCall {
            var,
            username: spec.test_data_value("username").unwrap_or_default().to_string(),
            password: spec.test_data_value("password").unwrap_or_default().to_string(),
        });
        let search = var_for(ScenarioCategory::PatientSearch).map(|var| TextCall {
            var,
            text: first_value(spec, &SEARCH_KEYS),
        });
        let message = var_for(ScenarioCategory::Messaging).map(|var| TextCall {
            var,
            text: first_value(spec, &MESSAGE_KEYS),
        });
        let navigate = var_for(ScenarioCategory::Navigation).map(|var| VarRef { var });

        let mut checks = Vec::new();
        let mut check = |var: &str, method: &'static str| {
            let check = Check {
                var: var.to_string(),
                method,
            };
            if !checks.contains(&check) {
                checks.push(check);
            }
        };
        if let Some(call) = &login {
            check(&call.var, "isLoggedIn");
        }
        if let Some(call) = &search {
            check(&call.var, "areSearchResultsDisplayed");
        }
        if let Some(call) = &message {
            check(&call.var, "isMessageListDisplayed");
        }
        if let Some(call) = &navigate {
            check(&call.var, "isMessageListDisplayed");
        }

        let url = spec.extract_url();
        let open = match (&url, &login, &self.settings.login_url) {
            (None, Some(call), Some(_)) => Some(VarRef {
                var: call.var.clone(),
            }),
            _ => None,
        };

        let description = if spec.summary.is_empty() {
            spec.id.clone()
        } else {
            format!("{} - {}", spec.id, spec.summary)
        };

        MethodView {
            id: &spec.id,
            summary: &spec.summary,
            description,
            priority,
            name: &scenario.method_name,
            preconditions: &spec.preconditions,
            steps: &spec.steps,
            pages: class
                .pages()
                .into_iter()
                .map(|page| PageVar {
                    class: page.to_string(),
                    var: page_var(page),
                })
                .collect(),
            url,
            open,
            login,
            search,
            message,
            navigate,
            checks,
            expected: &spec.expected_result,
        }
    }

    /// Hand-built class with no domain members, used when rendering fails
    fn minimal_skeleton(&self, request: GenerationRequest<'_>) -> String {
        let package = self.settings.package_for(request.kind());
        let name = request.class_name();
        match request {
            GenerationRequest::Page(_) => format!(
                "package {package};\n\nimport org.openqa.selenium.WebDriver;\n\n\
                 public class {name} extends BasePage {{\n\n    \
                 public {name}(WebDriver driver) {{\n        super(driver);\n    }}\n}}\n"
            ),
            GenerationRequest::TestClass(_) => {
                format!("package {package};\n\npublic class {name} extends BaseTest {{\n}}\n")
            }
            GenerationRequest::BasePage => format!(
                "package {package};\n\nimport org.openqa.selenium.WebDriver;\n\n\
                 public abstract class BasePage {{\n    protected final WebDriver driver;\n\n    \
                 public BasePage(WebDriver driver) {{\n        this.driver = driver;\n    }}\n}}\n"
            ),
            GenerationRequest::BaseTest => format!(
                "package {package};\n\nimport org.openqa.selenium.WebDriver;\n\n\
                 public class BaseTest {{\n    protected WebDriver driver;\n}}\n"
            ),
        }
    }
}

fn first_value(spec: &crate::scenario::ScenarioSpec, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| spec.test_data_value(key))
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl GenerationBackend for TemplateBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Template
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Synthesis {
        Synthesis::template(self.synthesize(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::pages::PageCatalog;
    use crate::generation::plan::GenerationPlan;
    use crate::generation::types::SynthesisOrigin;
    use crate::scenario::{RawScenario, ScenarioSpec};

    const LOCATOR_MARKER: &str = "// TODO: verify locator on real page";

    fn smit_specs() -> Vec<ScenarioSpec> {
        vec![
            ScenarioSpec::from_cells(RawScenario {
                id: "TC_SMIT_01",
                target_class_name: "PortalAuthenticationTest",
                target_method_name: "loginPortal",
                preconditions: "User has valid credentials",
                summary: "Login to SMIT Portal",
                test_data: "Username: welldocsu\nPassword: welldoc123",
                steps: "1. Navigate to https://portal.example/SMITPortal/Guest/Login.htm\n2. Enter username\n3. Click Login",
                expected_result: "System should allow the user to successfully login",
            }),
            ScenarioSpec::from_cells(RawScenario {
                id: "TC_SMIT_02",
                target_class_name: "PatientSearchTest",
                target_method_name: "searchPatient",
                summary: "Search for a patient",
                test_data: "Patient: John Doe",
                steps: "Enter patient name; Click Search",
                expected_result: "Matching patients are listed",
                ..Default::default()
            }),
            ScenarioSpec::from_cells(RawScenario {
                id: "TC_SMIT_03",
                target_class_name: "PortalNavigationTest",
                target_method_name: "navigateToMessages",
                summary: "Open the \"Messages\" view",
                steps: "Click Messages link",
                expected_result: "Message list is shown",
                ..Default::default()
            }),
        ]
    }

    fn plan() -> GenerationPlan {
        GenerationPlan::build(&smit_specs(), &PageCatalog::default())
    }

    fn page<'a>(plan: &'a GenerationPlan, name: &str) -> &'a PagePlan {
        plan.pages.iter().find(|p| p.name == name).unwrap()
    }

    fn class<'a>(plan: &'a GenerationPlan, name: &str) -> &'a ClassPlan {
        plan.classes.iter().find(|c| c.name == name).unwrap()
    }

    #[test]
    fn test_login_page_members() {
        let plan = plan();
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend.render(GenerationRequest::Page(page(&plan, "LoginPage"))).unwrap();

        assert!(code.starts_with("package pages;"));
        assert!(code.contains("public class LoginPage extends BasePage {"));
        assert!(code.contains("public LoginPage(WebDriver driver) {\n        super(driver);\n    }"));
        assert!(code.contains("private final By usernameField = By.id(\"cmusername\"); // TODO: verify locator on real page"));
        assert!(code.contains("public void login(String username, String password)"));
        assert!(code.contains("public boolean isLoggedIn()"));
        assert!(!code.contains("public void open()"));
        assert!(!code.contains("searchPatient"));
        assert_eq!(code.matches(LOCATOR_MARKER).count(), 3);
    }

    #[test]
    fn test_login_page_open_uses_configured_url() {
        let plan = plan();
        let settings = GenerationSettings {
            login_url: Some("https://portal.example/Login.htm".to_string()),
            ..Default::default()
        };
        let backend = TemplateBackend::new(settings);
        let code = backend.render(GenerationRequest::Page(page(&plan, "LoginPage"))).unwrap();
        assert!(code.contains("public void open() {\n        open(\"https://portal.example/Login.htm\");"));
    }

    #[test]
    fn test_search_and_message_pages() {
        let plan = plan();
        let backend = TemplateBackend::new(GenerationSettings::default());

        let search = backend
            .render(GenerationRequest::Page(page(&plan, "PatientSearchPage")))
            .unwrap();
        assert!(search.contains("public void searchPatient(String criteria)"));
        assert!(search.contains("public boolean areSearchResultsDisplayed()"));
        assert!(!search.contains("login("));

        let message = backend
            .render(GenerationRequest::Page(page(&plan, "MessagePage")))
            .unwrap();
        assert!(message.contains("public void sendMessage(String text)"));
        assert!(message.contains("public boolean isMessageListDisplayed()"));
        assert!(message.contains("public void navigateToMessages()"));
        assert_eq!(message.matches(LOCATOR_MARKER).count(), 4);
    }

    #[test]
    fn test_page_without_categories_is_minimal() {
        let page = PagePlan {
            name: "ReportsPage".to_string(),
            categories: BTreeSet::new(),
            specs: Vec::new(),
        };
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend.render(GenerationRequest::Page(&page)).unwrap();

        assert!(code.contains("public class ReportsPage extends BasePage {"));
        assert!(code.contains("public ReportsPage(WebDriver driver)"));
        assert!(!code.contains("private final By"));
        assert!(!code.contains("login("));
    }

    #[test]
    fn test_login_test_class() {
        let plan = plan();
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend
            .render(GenerationRequest::TestClass(class(&plan, "PortalAuthenticationTest")))
            .unwrap();

        assert!(code.starts_with("package tests;"));
        assert!(code.contains("import pages.LoginPage;"));
        assert!(code.contains("public class PortalAuthenticationTest extends BaseTest {"));
        assert!(code.contains(
            "@Test(description = \"TC_SMIT_01 - Login to SMIT Portal\", priority = 1)"
        ));
        assert!(code.contains("public void loginPortal() {"));
        assert!(code.contains("// TODO: verify steps for TC_SMIT_01 against the live portal"));
        assert!(code.contains("// Pre-conditions: User has valid credentials"));
        assert!(code.contains("// Step 3: Click Login"));
        assert!(code.contains("LoginPage loginPage = new LoginPage(driver);"));
        assert!(code.contains("driver.get(\"https://portal.example/SMITPortal/Guest/Login.htm\");"));
        assert!(code.contains("loginPage.login(\"welldocsu\", \"welldoc123\");"));
        assert!(code.contains(
            "Assert.assertTrue(loginPage.isLoggedIn(), \"System should allow the user to successfully login\");"
        ));
    }

    #[test]
    fn test_navigation_test_class_escapes_description() {
        let plan = plan();
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend
            .render(GenerationRequest::TestClass(class(&plan, "PortalNavigationTest")))
            .unwrap();

        assert!(code.contains("description = \"TC_SMIT_03 - Open the \\\"Messages\\\" view\""));
        assert!(code.contains("messagePage.navigateToMessages();"));
        assert!(code.contains("Assert.assertTrue(messagePage.isMessageListDisplayed(), \"Message list is shown\");"));
        assert!(!code.contains("driver.get("));
    }

    #[test]
    fn test_unrecognized_class_asserts_expected_result() {
        let specs = vec![ScenarioSpec::from_cells(RawScenario {
            id: "TC_9",
            target_class_name: "ReportingTest",
            expected_result: "Report is exported",
            ..Default::default()
        })];
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend
            .render(GenerationRequest::TestClass(&plan.classes[0]))
            .unwrap();

        assert!(code.contains("public void testTc9() {"));
        assert!(code.contains("Assert.assertTrue(true, \"Report is exported\");"));
        assert!(!code.contains("import pages."));
    }

    #[test]
    fn test_priorities_follow_input_order() {
        let specs: Vec<_> = ["TC_1", "TC_2", "TC_3"]
            .iter()
            .map(|id| ScenarioSpec {
                id: id.to_string(),
                target_class_name: "LoginTest".to_string(),
                ..Default::default()
            })
            .collect();
        let plan = GenerationPlan::build(&specs, &PageCatalog::default());
        let backend = TemplateBackend::new(GenerationSettings::default());
        let code = backend
            .render(GenerationRequest::TestClass(&plan.classes[0]))
            .unwrap();

        let first = code.find("priority = 1").unwrap();
        let second = code.find("priority = 2").unwrap();
        let third = code.find("priority = 3").unwrap();
        assert!(first < second && second < third);
        assert!(code.find("testTc1").unwrap() < code.find("testTc3").unwrap());
    }

    #[test]
    fn test_base_classes() {
        let backend = TemplateBackend::new(GenerationSettings::default());
        let base_page = backend.render(GenerationRequest::BasePage).unwrap();
        assert!(base_page.contains("public abstract class BasePage"));
        assert!(base_page.contains("protected void type(By locator, String text)"));
        assert!(base_page.contains("protected boolean isDisplayed(By locator)"));

        let base_test = backend.render(GenerationRequest::BaseTest).unwrap();
        assert!(base_test.starts_with("package tests;"));
        assert!(base_test.contains("@BeforeMethod"));
        assert!(base_test.contains("driver.quit();"));
    }

    #[test]
    fn test_minimal_skeleton_shapes() {
        let page = PagePlan {
            name: "LoginPage".to_string(),
            categories: BTreeSet::new(),
            specs: Vec::new(),
        };
        let backend = TemplateBackend::new(GenerationSettings::default());
        let skeleton = backend.minimal_skeleton(GenerationRequest::Page(&page));
        assert!(skeleton.starts_with("package pages;"));
        assert!(skeleton.contains("public LoginPage(WebDriver driver) {\n        super(driver);\n    }"));
    }

    #[tokio::test]
    async fn test_generate_reports_template_origin() {
        let backend = TemplateBackend::new(GenerationSettings::default());
        let synthesis = backend.generate(GenerationRequest::BaseTest).await;
        assert_eq!(synthesis.origin, SynthesisOrigin::Template);
        assert_eq!(backend.kind(), BackendKind::Template);
    }
}
