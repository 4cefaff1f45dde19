//! Shared on-disk content fixture for integration tests.

use std::fs;
use std::path::Path;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Two roadmap phases, one problem track and one coming-soon track.
///
/// `aiml` topics: linear-algebra (2 subtopics), calculus (1) in phase 0,
/// regression (1, needs linear-algebra and a missing "statistics") in phase 1.
pub fn write_content(root: &Path) {
    write(
        &root.join("tracks.json"),
        r#"[
            {"id": "aiml", "name": "AI / ML Engineer", "basePath": "/aiml"},
            {"id": "dsa", "name": "Data Structures & Algorithms", "kind": "problems"},
            {"id": "devops", "name": "DevOps", "status": "coming-soon"}
        ]"#,
    );
    write(
        &root.join("aiml/roadmap.json"),
        r#"{"phases": [
            {"id": 1, "title": "Machine Learning", "difficulty": "intermediate", "estimatedWeeks": 6},
            {"id": 0, "title": "Mathematics", "difficulty": "beginner", "estimatedWeeks": 4}
        ]}"#,
    );
    write(
        &root.join("aiml/phases/phase0.json"),
        r#"[
            {"id": "linear-algebra", "phase": 0, "title": "Linear Algebra",
             "description": "Vectors, matrices and transformations",
             "eli5": "Arrows and grids of numbers",
             "difficulty": "beginner", "estimatedHours": 20,
             "subtopics": ["Vectors", {"name": "Matrices", "explanation": "Grids of numbers"}],
             "tags": ["math", "foundations"]},
            {"id": "calculus", "phase": 0, "title": "Calculus",
             "description": "Rates of change", "difficulty": "beginner",
             "estimatedHours": 15, "subtopics": ["Derivatives"], "tags": ["math"]}
        ]"#,
    );
    write(
        &root.join("aiml/phases/phase1.json"),
        r#"[
            {"id": "regression", "phase": 1, "title": "Linear Regression",
             "description": "Fitting lines to data", "difficulty": "intermediate",
             "estimatedHours": 10, "subtopics": [{"name": "Least squares"}],
             "prerequisites": ["linear-algebra", "statistics"], "futureField": true}
        ]"#,
    );
    write(
        &root.join("dsa/sections.json"),
        r#"{"sections": [
            {"title": "Arrays", "problems": [
                {"id": 1, "label": "Two Sum", "difficulty": "easy", "important": true,
                 "question": "https://example.com/two-sum", "solution": "-"},
                {"id": 2, "label": "Trapping Rain Water", "difficulty": "hard"}
            ]},
            {"title": "Graphs", "subsections": [
                {"title": "BFS", "problems": [{"id": "g-1", "label": "Rotting Oranges"}]},
                {"title": "DFS", "problems": [{"id": "g-2", "label": "Number of Islands"}]}
            ]}
        ]}"#,
    );
}
