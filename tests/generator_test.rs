use kitgen::answers::{AnswerSet, TargetPlatform, UiFramework};
use kitgen::constants::STATE_FILE;
use kitgen::error::Error;
use kitgen::generator::Generator;
use kitgen::registry::PredicateRegistry;
use kitgen::renderer::MiniJinjaRenderer;
use kitgen::scanner::ScanFilter;
use kitgen::selection::TagPolicy;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn starter_kit(root: &Path) {
    write(root, "_web/index.html", "web index");
    write(root, "_mobile/index.html", "mobile index");
    write(root, "_bootstrap/theme.css", "bootstrap theme");
    write(root, "_material/theme.css", "material theme");
    write(root, "_package.json", "{\"name\": \"{{ projectName }}\", \"version\": \"0.0.0\"}\n");
    write(root, "src/__ionic.config.ts", "export const app = '{{ appName }}';\n");
    write(root, "src/main.ts", "bootstrap();\n");
    write(root, "src/.DS_Store", "junk");
}

fn web_bootstrap() -> AnswerSet {
    AnswerSet::new("My App", TargetPlatform::Web, UiFramework::Bootstrap).unwrap()
}

#[test_log::test]
fn test_generate_web_bootstrap() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let expected = TempDir::new().unwrap();
    starter_kit(templates.path());

    let answers = web_bootstrap();
    assert_eq!(answers.project_name(), "my-app");

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let generator = Generator::new(templates.path(), output.path(), &registry, &renderer);
    let report = generator.generate(&answers).unwrap();
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.skipped, 3);

    // The state record is checked separately.
    fs::remove_file(output.path().join(STATE_FILE)).unwrap();

    write(expected.path(), "index.html", "web index");
    write(expected.path(), "theme.css", "bootstrap theme");
    write(expected.path(), "package.json", "{\"name\": \"my-app\", \"version\": \"0.0.0\"}\n");
    write(expected.path(), "src/main.ts", "bootstrap();\n");
    assert!(!dir_diff::is_different(output.path(), expected.path()).unwrap());
}

#[test_log::test]
fn test_generate_mobile_ionic() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    starter_kit(templates.path());

    let answers = AnswerSet::new("Field Notes", TargetPlatform::Mobile, UiFramework::Ionic).unwrap();
    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&answers)
        .unwrap();

    let out = output.path();
    assert_eq!(fs::read_to_string(out.join("index.html")).unwrap(), "mobile index");
    assert_eq!(
        fs::read_to_string(out.join("src/config.ts")).unwrap(),
        "export const app = 'Field Notes';\n"
    );
    assert!(!out.join("theme.css").exists());
}

#[test]
fn test_state_record_written() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    starter_kit(templates.path());

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&web_bootstrap())
        .unwrap();

    let previous = kitgen::state::load_state(output.path()).unwrap().unwrap();
    assert_eq!(previous.props, web_bootstrap());
}

#[test]
fn test_conflict_aborts_before_any_write() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    starter_kit(templates.path());

    let answers = AnswerSet::new("My App", TargetPlatform::Both, UiFramework::Bootstrap).unwrap();
    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let result = Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&answers);

    assert!(matches!(result, Err(Error::WriteConflict { destination, .. }) if destination == "index.html"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_tag_policy() {
    let templates = TempDir::new().unwrap();
    write(templates.path(), "_desktop/main.ts", "desktop");
    write(templates.path(), "README.md", "readme");

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();

    let strict_out = TempDir::new().unwrap();
    let result = Generator::new(templates.path(), strict_out.path(), &registry, &renderer)
        .generate(&web_bootstrap());
    assert!(matches!(result, Err(Error::UnknownTag { tag, .. }) if tag == "desktop"));

    let legacy_out = TempDir::new().unwrap();
    Generator::new(templates.path(), legacy_out.path(), &registry, &renderer)
        .with_policy(TagPolicy::Permissive)
        .generate(&web_bootstrap())
        .unwrap();
    assert!(legacy_out.path().join("main.ts").is_file());
}

#[test]
fn test_render_error_names_source() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(templates.path(), "_broken.txt", "{{ not_an_answer }}");

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let result = Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&web_bootstrap());
    assert!(matches!(result, Err(Error::RenderError { path, .. }) if path == "_broken.txt"));
}

#[test]
fn test_exclude_patterns() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    starter_kit(templates.path());
    write(templates.path(), "src/main.ts.swp", "swap");

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let filter = ScanFilter::default().with_patterns(["**/*.swp"]).unwrap();
    let generator = Generator::new(templates.path(), output.path(), &registry, &renderer)
        .with_filter(filter);

    let plan = generator.plan(&web_bootstrap()).unwrap();
    let destinations: Vec<_> = plan.destinations().collect();
    assert_eq!(destinations, ["index.html", "package.json", "src/main.ts", "theme.css"]);
}

#[test]
fn test_classification_is_stable_across_runs() {
    let templates = TempDir::new().unwrap();
    starter_kit(templates.path());

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let generator = Generator::new(templates.path(), "unused", &registry, &renderer);
    assert_eq!(generator.classify_all().unwrap(), generator.classify_all().unwrap());
}

#[test]
fn test_unreadable_template_names_its_source() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(templates.path().join("_logo.png"), [0x89, 0x50, 0xff, 0xfe, 0x00]).unwrap();

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let result = Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&web_bootstrap());

    let err = result.unwrap_err();
    assert!(matches!(&err, Error::FileError { path, .. } if path == "_logo.png"));
    assert!(err.to_string().contains("_logo.png"));
}

#[test]
fn test_template_cannot_replace_state_record() {
    let templates = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(templates.path(), "_.kitgen.json", "clobbered");

    let registry = PredicateRegistry::standard();
    let renderer = MiniJinjaRenderer::new();
    let result = Generator::new(templates.path(), output.path(), &registry, &renderer)
        .generate(&web_bootstrap());

    assert!(matches!(
        result,
        Err(Error::WriteConflict { destination, second, .. })
            if destination == STATE_FILE && second == "_.kitgen.json"
    ));
    assert!(!output.path().join(STATE_FILE).exists());
}
