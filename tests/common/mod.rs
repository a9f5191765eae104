#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use take_flight::config::Settings;
use take_flight::error::{Error, Result};
use take_flight::prompt::Selections;
use take_flight::runner::{CommandRunner, CommandSpec};
use take_flight::template::TemplateKind;

pub const EXPRESS_MANIFEST: &str = r#"{
  "name": "{{projectName}}",
  "version": "0.1.0",
  "scripts": {
    "start": "node server.js"
  },
  "dependencies": {
    "express": "^4.19.2"
  }
}
"#;

pub const REACT_MANIFEST: &str = r#"{
  "name": "{{projectName}}",
  "private": true,
  "dependencies": {
    "react": "^18.3.1"
  }
}
"#;

pub fn write<P: AsRef<Path>>(path: P, content: &str) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read<P: AsRef<Path>>(path: P) -> String {
    fs::read_to_string(path).unwrap()
}

/// Path of the templates shipped with the crate.
pub fn bundled_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Builds a templates root with both generic base templates and every fragment.
pub fn create_templates(root: &Path) {
    write(root.join("express/package.json"), EXPRESS_MANIFEST);
    write(root.join("express/README.md"), "# {{projectName}}\n\nGenerated.\n");
    write(
        root.join("express/server.js"),
        "app.get('/', (req, res) => res.send('{{projectName}}'))\n",
    );
    write(
        root.join("express/node_modules/left-pad/index.js"),
        "module.exports = () => ''\n",
    );

    write(root.join("react/package.json"), REACT_MANIFEST);
    write(root.join("react/src/main.jsx"), "export default function App() {}\n");

    write(
        root.join("auth/supabase/src/auth.js"),
        "import { client } from '../lib/client'\nimport './session'\n",
    );
    write(root.join("auth/supabase/src/session.js"), "export const session = null\n");
    write(root.join("auth/supabase/SETUP.md"), "# Supabase setup\n");
    write(
        root.join("auth/firebase/src/auth.js"),
        "import { auth } from './firebase-config'\n",
    );
    write(
        root.join("auth/firebase/src/firebase-config.js"),
        "export const auth = {}\n",
    );

    write(
        root.join("nextjs-auth/nextauth/src/nextAuth-config.ts"),
        "import { handlers } from \"../auth\"\nexport const authConfig = {}\n",
    );
    write(root.join("nextjs-auth/nextauth/SETUP.md"), "# NextAuth setup\n");
    write(root.join("nextjs-auth/supabase/src/auth.ts"), "export const supabase = {}\n");

    for db in ["sqlite", "postgresql", "mongodb"] {
        write(
            root.join(format!("db/{db}/src/{db}.js")),
            "import config from '../config'\n",
        );
        write(
            root.join(format!("db/{db}/src/{db}.ts")),
            "import config from '../config'\n",
        );
    }
    write(root.join("db/postgresql/SETUP.md"), "# PostgreSQL setup\n");
}

/// Creates `templates/` and `out/` under `base` and returns matching settings.
pub fn settings(base: &Path) -> Settings {
    let templates = base.join("templates");
    let output = base.join("out");
    create_templates(&templates);
    fs::create_dir_all(&output).unwrap();
    Settings::new(templates, output).unwrap()
}

pub fn selections(name: &str, template: TemplateKind, auth: Option<&str>, database: Option<&str>) -> Selections {
    Selections {
        project_name: name.to_string(),
        template,
        auth: auth.map(str::to_string),
        database: database.map(str::to_string),
    }
}

type Hook = Box<dyn Fn(&CommandSpec, &Path)>;

/// Records every command instead of running it.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: RefCell<Vec<(String, PathBuf)>>,
    fail_program: Option<String>,
    hook: Option<Hook>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every command whose program is `program`.
    pub fn failing(program: &str) -> Self {
        Self {
            fail_program: Some(program.to_string()),
            ..Self::default()
        }
    }

    /// Simulates the next scaffolding tool by creating a minimal project.
    pub fn scaffolding_next() -> Self {
        Self {
            hook: Some(Box::new(|command, cwd| {
                if command.program == "npx" {
                    let project = cwd.join(&command.args[1]);
                    write(
                        project.join("package.json"),
                        "{\n  \"name\": \"scaffolded\",\n  \"dependencies\": {\n    \"next\": \"15.0.0\"\n  }\n}\n",
                    );
                    write(project.join("src/app/page.tsx"), "export default function Page() {}\n");
                }
            })),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(command, _)| command.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), cwd.to_path_buf()));
        if let Some(hook) = &self.hook {
            hook(command, cwd);
        }
        if self.fail_program.as_deref() == Some(command.program.as_str()) {
            return Err(Error::ExternalProcess {
                command: command.to_string(),
                reason: "exited with exit status: 1".to_string(),
            });
        }
        Ok(())
    }
}
