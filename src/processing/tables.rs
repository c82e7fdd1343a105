//! Built-in reference tables owned by the analysis engine
//!
//! Everything here is plain data. `EngineTables::default()` carries the shipped tables;
//! tests and embedders can build their own and hand them to the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Percentile thresholds for one subscore
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Benchmark {
    pub const fn new(p25: f64, p50: f64, p75: f64, p90: f64) -> Self {
        Self { p25, p50, p75, p90 }
    }

    /// Bucket a score into the 10th/25th/50th/75th/90th percentile
    pub fn percentile(&self, score: f64) -> u8 {
        if score >= self.p90 {
            90
        } else if score >= self.p75 {
            75
        } else if score >= self.p50 {
            50
        } else if score >= self.p25 {
            25
        } else {
            10
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBenchmarks {
    pub overall: Benchmark,
    pub ats: Benchmark,
    pub alignment: Benchmark,
    pub impact: Benchmark,
    pub polish: Benchmark,
    pub potential: Benchmark,
}

impl Default for ScoreBenchmarks {
    fn default() -> Self {
        Self {
            overall: Benchmark::new(45.0, 65.0, 80.0, 90.0),
            ats: Benchmark::new(40.0, 60.0, 75.0, 85.0),
            alignment: Benchmark::new(35.0, 55.0, 75.0, 88.0),
            impact: Benchmark::new(30.0, 50.0, 70.0, 85.0),
            polish: Benchmark::new(45.0, 65.0, 80.0, 92.0),
            potential: Benchmark::new(50.0, 70.0, 85.0, 95.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineTables {
    /// Alias spelling -> canonical spelling
    pub aliases: HashMap<String, String>,
    /// (plural suffix, singular suffix), applied in order
    pub plural_rules: Vec<(String, String)>,
    pub tech_vocabulary: Vec<String>,
    /// Weeks to intern-level proficiency
    pub base_weeks: HashMap<String, f64>,
    pub default_weeks: f64,
    pub learning_paths: HashMap<String, Vec<String>>,
    pub benchmarks: ScoreBenchmarks,
    /// Per role-category demand multiplier; categories not listed use 1.0
    pub industry_weights: HashMap<String, f64>,
    pub fallback_market: Vec<(String, u64)>,
}

impl Default for EngineTables {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
            plural_rules: default_plural_rules(),
            tech_vocabulary: default_tech_vocabulary(),
            base_weeks: default_base_weeks(),
            default_weeks: 4.0,
            learning_paths: default_learning_paths(),
            benchmarks: ScoreBenchmarks::default(),
            industry_weights: HashMap::new(),
            fallback_market: default_fallback_market(),
        }
    }
}

impl EngineTables {
    pub fn industry_weight(&self, role_category: &str) -> f64 {
        self.industry_weights.get(role_category).copied().unwrap_or(1.0)
    }

    pub fn base_weeks_for(&self, skill: &str) -> f64 {
        self.base_weeks
            .get(&skill.to_lowercase())
            .copied()
            .unwrap_or(self.default_weeks)
    }
}

fn pairs(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn default_aliases() -> HashMap<String, String> {
    pairs(&[
        ("js", "javascript"),
        ("ts", "typescript"),
        ("py", "python"),
        ("tf", "tensorflow"),
        ("k8s", "kubernetes"),
        ("gcp", "google cloud platform"),
        ("node", "node.js"),
        ("nodejs", "node.js"),
        ("ml", "machine learning"),
        ("ai", "artificial intelligence"),
        ("dl", "deep learning"),
        ("nlp", "natural language processing"),
        ("cv", "computer vision"),
        ("nosql", "nosql databases"),
        ("rest", "rest apis"),
        ("postgres", "postgresql"),
        ("sklearn", "scikit-learn"),
        ("ci", "continuous integration"),
        ("cd", "continuous deployment"),
        ("agile", "agile methodologies"),
        ("scrum", "scrum framework"),
    ])
}

fn default_plural_rules() -> Vec<(String, String)> {
    [
        ("apis", "api"),
        ("databases", "database"),
        ("frameworks", "framework"),
        ("libraries", "library"),
        ("algorithms", "algorithm"),
        ("models", "model"),
        ("pipelines", "pipeline"),
        ("services", "service"),
        ("applications", "application"),
        ("systems", "system"),
    ]
    .iter()
    .map(|(p, s)| (p.to_string(), s.to_string()))
    .collect()
}

/// Technical vocabulary seeded into every dictionary. Entries that are also everyday
/// English words ("less", "spring", "go", ...) are left out.
fn default_tech_vocabulary() -> Vec<String> {
    [
        // Programming languages
        "python", "javascript", "typescript", "java", "c++", "c#", "golang",
        "rust", "swift", "kotlin", "scala", "ruby", "php", "matlab", "perl",
        "dart", "lua", "haskell", "erlang", "elixir", "clojure", "f#", "ocaml",
        // Web
        "html", "html5", "css", "css3", "sass", "scss",
        "react", "react.js", "vue", "vue.js", "angular", "angularjs", "svelte",
        "next.js", "nuxt.js", "gatsby", "jquery", "bootstrap", "tailwind css", "material-ui",
        "webpack", "vite", "babel", "eslint",
        // Backend
        "node.js", "express.js", "nest.js", "fastify",
        "django", "flask", "fastapi", "tornado",
        "spring boot", "spring mvc", "hibernate",
        "asp.net", ".net", "asp.net core", "entity framework",
        "ruby on rails", "laravel", "symfony", "codeigniter",
        // Databases
        "sql", "mysql", "postgresql", "sqlite", "oracle database",
        "mongodb", "cassandra", "redis", "elasticsearch", "dynamodb",
        "neo4j", "couchdb", "influxdb", "timescaledb",
        "firebase", "firestore", "supabase",
        // Cloud & DevOps
        "aws", "amazon web services", "ec2", "s3", "aws lambda", "rds",
        "azure", "microsoft azure", "azure functions", "azure devops",
        "gcp", "google cloud platform", "cloud functions",
        "docker", "kubernetes", "k8s", "terraform", "ansible",
        "jenkins", "circleci", "travis ci", "github actions", "gitlab ci",
        "nginx", "haproxy", "ci/cd",
        // Data science & ML
        "machine learning", "ml", "deep learning", "neural networks",
        "tensorflow", "pytorch", "keras", "scikit-learn", "sklearn",
        "pandas", "numpy", "scipy", "matplotlib", "seaborn", "plotly",
        "jupyter", "jupyter notebook", "jupyter notebooks", "kaggle",
        "xgboost", "lightgbm", "catboost", "spark", "apache spark",
        "hadoop", "hbase", "kafka", "flink",
        "tableau", "power bi", "looker", "metabase",
        "statistics", "data visualization", "data analysis", "data cleaning", "excel",
        // AI & NLP
        "artificial intelligence", "ai", "natural language processing", "nlp",
        "computer vision", "opencv", "yolo",
        "transformers", "bert", "gpt", "llm", "langchain", "hugging face",
        "spacy", "nltk", "gensim", "word2vec",
        // Mobile
        "react native", "flutter", "xamarin",
        "ios", "objective-c", "xcode", "android", "android studio",
        // Testing
        "jest", "mocha", "jasmine", "karma", "pytest", "unittest",
        "selenium", "cypress", "playwright", "puppeteer",
        "junit", "testng", "mockito", "unit testing",
        // Version control & tools
        "git", "github", "gitlab", "bitbucket", "svn", "mercurial",
        "jira", "confluence",
        // Monitoring
        "prometheus", "grafana", "datadog", "new relic", "splunk",
        "elk stack", "logstash", "kibana", "sentry",
        // API & microservices
        "rest api", "rest apis", "graphql", "grpc", "soap",
        "microservices", "api gateway", "rabbitmq", "apache kafka", "amqp",
        // Security
        "oauth", "oauth2", "jwt", "ssl", "tls",
        "penetration testing", "vulnerability assessment", "owasp",
        // Other tools
        "linux", "unix", "bash", "bash scripting", "shell scripting", "powershell",
        "vim", "emacs", "vscode", "intellij", "eclipse",
        "postman", "swagger", "openapi",
        "figma", "adobe xd",
        "agile", "scrum", "kanban", "devops",
        // Specialized
        "blockchain", "ethereum", "solidity", "web3",
        "iot", "internet of things", "arduino", "raspberry pi",
        "game development", "unity", "unreal engine", "ros",
        "embedded systems", "fpga", "verilog", "vhdl",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_base_weeks() -> HashMap<String, f64> {
    [
        ("html", 1.0),
        ("css", 2.0),
        ("javascript", 4.0),
        ("python", 3.0),
        ("git", 1.0),
        ("sql", 3.0),
        ("react", 4.0),
        ("excel", 2.0),
        ("data visualization", 3.0),
        ("machine learning", 8.0),
        ("docker", 3.0),
        ("linux", 4.0),
        ("c++", 8.0),
        ("unity", 6.0),
        ("ros", 12.0),
        ("statistics", 6.0),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), *v))
    .collect()
}

fn default_learning_paths() -> HashMap<String, Vec<String>> {
    let paths: [(&str, [&str; 4]); 5] = [
        (
            "python",
            [
                "Learn Python syntax basics",
                "Practice with coding exercises",
                "Build a simple project",
                "Explore relevant libraries",
            ],
        ),
        (
            "machine learning",
            [
                "Study math fundamentals (statistics, linear algebra)",
                "Learn Python and data libraries (pandas, numpy)",
                "Complete ML course (Coursera/edX)",
                "Build ML project from scratch",
            ],
        ),
        (
            "react",
            [
                "Master HTML, CSS, JavaScript first",
                "Learn React fundamentals",
                "Build component-based project",
                "Add state management and routing",
            ],
        ),
        (
            "sql",
            [
                "Learn basic query syntax",
                "Practice with sample databases",
                "Study joins and advanced queries",
                "Apply to real data project",
            ],
        ),
        (
            "docker",
            [
                "Understand containerization concepts",
                "Learn basic Docker commands",
                "Create Dockerfile for simple app",
                "Practice with docker-compose",
            ],
        ),
    ];

    paths
        .iter()
        .map(|(skill, steps)| {
            (
                skill.to_string(),
                steps.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

fn default_fallback_market() -> Vec<(String, u64)> {
    [
        ("python", 22016),
        ("sql", 18322),
        ("java", 12482),
        ("javascript", 9661),
        ("excel", 12221),
        ("aws", 8853),
        ("git", 6420),
        ("docker", 5832),
        ("react", 6900),
        ("node.js", 5800),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), *v))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_buckets() {
        let overall = ScoreBenchmarks::default().overall;
        assert_eq!(overall.percentile(95.0), 90);
        assert_eq!(overall.percentile(90.0), 90);
        assert_eq!(overall.percentile(80.0), 75);
        assert_eq!(overall.percentile(65.0), 50);
        assert_eq!(overall.percentile(45.0), 25);
        assert_eq!(overall.percentile(44.9), 10);
    }

    #[test]
    fn test_base_weeks_default() {
        let tables = EngineTables::default();
        assert_eq!(tables.base_weeks_for("ROS"), 12.0);
        assert_eq!(tables.base_weeks_for("haskell"), 4.0);
    }

    #[test]
    fn test_industry_weight_is_neutral_by_default() {
        let tables = EngineTables::default();
        assert_eq!(tables.industry_weight("AI/ML"), 1.0);
        assert_eq!(tables.industry_weight("anything"), 1.0);
    }

    #[test]
    fn test_fallback_market_has_ten_entries() {
        assert_eq!(EngineTables::default().fallback_market.len(), 10);
    }
}
