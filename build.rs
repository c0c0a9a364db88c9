use std::collections::HashSet;
use std::path::Path;

/// Smallest numeric prefix; zero leaves the leading digits empty.
const MIN_MACHINE_CODE: u64 = 1;

/// Largest numeric prefix that still fits the three leading digits of the machine barcode.
const MAX_MACHINE_CODE: u64 = 999;

fn main() {
    let registry_path = Path::new("catalogs/prefixes.json");
    validate_registry_file(registry_path);
    set_build_dependencies();
}

fn validate_registry_file(registry_path: &Path) {
    // Ensure the registry exists at build time
    assert!(
        registry_path.exists(),
        "\n\nREGISTRY BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the prefix registry before building.\n",
        registry_path.display()
    );

    let contents = std::fs::read_to_string(registry_path).unwrap_or_else(|e| {
        panic!(
            "\n\nREGISTRY BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            registry_path.display()
        );
    });

    let registry: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nREGISTRY BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            registry_path.display()
        );
    });

    validate_registry_structure(&registry);
}

fn validate_registry_structure(registry: &serde_json::Value) {
    assert!(
        registry.is_object(),
        "\n\nREGISTRY BUILD ERROR: Root must be a JSON object\n\
         Got: {registry}\n"
    );

    let prefixes = registry.get("prefixes").unwrap_or_else(|| {
        panic!(
            "\n\nREGISTRY BUILD ERROR: Missing 'prefixes' field\n\
             The registry must have a top-level 'prefixes' array.\n"
        );
    });

    let entries = prefixes.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nREGISTRY BUILD ERROR: 'prefixes' must be an array\n\
             Got: {prefixes}\n"
        );
    });

    validate_entries(entries);

    println!(
        "cargo:warning=Validated prefix registry: {} prefixes",
        entries.len()
    );
}

fn validate_entries(entries: &[serde_json::Value]) {
    let mut humans = HashSet::new();
    let mut machines = HashSet::new();

    for (i, entry) in entries.iter().enumerate() {
        let human = entry
            .get("human")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_else(|| {
                panic!("\n\nREGISTRY BUILD ERROR: Prefix at index {i} missing 'human' field\n")
            });

        assert!(
            human.len() == 2 && human.chars().all(|c| c.is_ascii_uppercase()),
            "\n\nREGISTRY BUILD ERROR: Prefix '{human}' (index {i}) must be two uppercase letters\n"
        );

        let machine = entry
            .get("machine")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or_else(|| {
                panic!(
                    "\n\nREGISTRY BUILD ERROR: Prefix '{human}' (index {i}) missing numeric 'machine' field\n"
                )
            });

        assert!(
            (MIN_MACHINE_CODE..=MAX_MACHINE_CODE).contains(&machine),
            "\n\nREGISTRY BUILD ERROR: Prefix '{human}' has machine code {machine}\n\
             Machine codes must be between {MIN_MACHINE_CODE} and {MAX_MACHINE_CODE}.\n"
        );

        assert!(
            humans.insert(human.to_string()),
            "\n\nREGISTRY BUILD ERROR: Duplicate human prefix '{human}'\n"
        );
        assert!(
            machines.insert(machine),
            "\n\nREGISTRY BUILD ERROR: Duplicate machine code {machine} ('{human}')\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the registry changes
    println!("cargo:rerun-if-changed=catalogs/prefixes.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
