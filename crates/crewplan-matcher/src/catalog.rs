// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The archetype catalog: role templates, domain team templates, synergy
//! groups and the fallback priority order.
//!
//! A catalog is built once and read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use crewplan_core::{AgentArchetype, Complexity, CrewplanError, DomainTag, RoleCategory};

use Complexity::{Advanced, Complex, Medium, Simple};
use DomainTag::{Automation, Commerce, Content, Data, Documents, General, Mobile, Web};

/// Read-only collection of agent archetypes and team recipes.
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    archetypes: Vec<AgentArchetype>,
    index: HashMap<String, usize>,
    templates: BTreeMap<DomainTag, Vec<Vec<String>>>,
    synergy_groups: Vec<(String, Vec<String>)>,
    fallback_order: Vec<String>,
}

impl AgentCatalog {
    /// Builds a catalog from parts. Archetype ids must be unique.
    ///
    /// Templates stored under [`DomainTag::General`] serve every domain that
    /// has none of its own.
    pub fn new(
        archetypes: Vec<AgentArchetype>,
        templates: BTreeMap<DomainTag, Vec<Vec<String>>>,
        synergy_groups: Vec<(String, Vec<String>)>,
        fallback_order: Vec<String>,
    ) -> Result<Self, CrewplanError> {
        let mut index = HashMap::with_capacity(archetypes.len());
        for (i, a) in archetypes.iter().enumerate() {
            if index.insert(a.id.clone(), i).is_some() {
                return Err(CrewplanError::Config(format!(
                    "duplicate archetype id `{}` in catalog",
                    a.id
                )));
            }
        }
        Ok(Self {
            archetypes,
            index,
            templates,
            synergy_groups,
            fallback_order,
        })
    }

    /// A catalog holding only `archetypes`, with no templates or groups.
    pub fn from_archetypes(archetypes: Vec<AgentArchetype>) -> Result<Self, CrewplanError> {
        Self::new(archetypes, BTreeMap::new(), Vec::new(), Vec::new())
    }

    /// The built-in catalog of 21 archetypes.
    pub fn builtin() -> Self {
        let archetypes: Vec<AgentArchetype> = BUILTIN.iter().map(ArchetypeSpec::build).collect();
        let index = archetypes
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();
        let templates = BUILTIN_TEMPLATES
            .iter()
            .map(|(domain, teams)| (*domain, teams.iter().map(|t| owned(t)).collect()))
            .collect();
        let synergy_groups = BUILTIN_SYNERGY_GROUPS
            .iter()
            .map(|(name, ids)| (name.to_string(), owned(ids)))
            .collect();
        Self {
            archetypes,
            index,
            templates,
            synergy_groups,
            fallback_order: owned(BUILTIN_FALLBACK_ORDER),
        }
    }

    /// Every archetype in catalog order.
    pub fn archetypes(&self) -> &[AgentArchetype] {
        &self.archetypes
    }

    pub fn get(&self, id: &str) -> Option<&AgentArchetype> {
        self.index.get(id).map(|&i| &self.archetypes[i])
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Team templates for `domain`, or the general templates.
    pub fn templates_for(&self, domain: DomainTag) -> &[Vec<String>] {
        self.templates
            .get(&domain)
            .or_else(|| self.templates.get(&DomainTag::General))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Named synergy groups.
    pub fn synergy_groups(&self) -> &[(String, Vec<String>)] {
        &self.synergy_groups
    }

    /// Archetype ids used when no candidate team survives.
    pub fn fallback_order(&self) -> &[String] {
        &self.fallback_order
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

struct ArchetypeSpec {
    id: &'static str,
    role_title: &'static str,
    goal: &'static str,
    backstory: &'static str,
    category: RoleCategory,
    domains: &'static [DomainTag],
    capabilities: &'static [&'static str],
    complexity_fit: &'static [Complexity],
    priority: u8,
    synergy_ids: &'static [&'static str],
}

impl ArchetypeSpec {
    fn build(&self) -> AgentArchetype {
        AgentArchetype {
            id: self.id.to_string(),
            role_title: self.role_title.to_string(),
            goal: self.goal.to_string(),
            backstory: self.backstory.to_string(),
            category: self.category,
            domains: self.domains.iter().copied().collect(),
            capabilities: owned(self.capabilities),
            complexity_fit: self.complexity_fit.iter().copied().collect(),
            priority: self.priority,
            synergy_ids: owned(self.synergy_ids),
        }
    }
}

const BUILTIN: &[ArchetypeSpec] = &[
    ArchetypeSpec {
        id: "requirements_analyst",
        role_title: "Senior Requirements Analyst",
        goal: "Analyze and structure project requirements with precision",
        backstory: "You are a senior business analyst with 15+ years of experience. You excel at understanding complex requirements, identifying hidden needs, and translating business goals into clear technical specifications.",
        category: RoleCategory::Analysis,
        domains: &[General, Web, Data, Automation],
        capabilities: &["requirement_analysis", "business_logic", "specification"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 1,
        synergy_ids: &["technology_researcher", "solution_architect"],
    },
    ArchetypeSpec {
        id: "technology_researcher",
        role_title: "Technology Research Specialist",
        goal: "Research and recommend optimal technology stack and implementation approaches",
        backstory: "You are a technology research expert with deep knowledge of modern frameworks, tools, and best practices. You stay current with industry trends and can recommend the most suitable technologies for any project type.",
        category: RoleCategory::Analysis,
        domains: &[General, Web, Mobile, Data],
        capabilities: &["tech_research", "framework_selection", "best_practices"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 2,
        synergy_ids: &["requirements_analyst", "solution_architect", "implementation_engineer"],
    },
    ArchetypeSpec {
        id: "solution_architect",
        role_title: "Senior Solution Architect",
        goal: "Design comprehensive system architecture and implementation strategy",
        backstory: "You are a senior solution architect with expertise in designing scalable, maintainable systems. You excel at creating detailed technical designs that balance performance, security, and development efficiency.",
        category: RoleCategory::Architecture,
        domains: &[General, Web, Data, Commerce],
        capabilities: &["system_design", "architecture", "scalability", "integration"],
        complexity_fit: &[Complex, Advanced],
        priority: 2,
        synergy_ids: &["technology_researcher", "implementation_engineer"],
    },
    ArchetypeSpec {
        id: "implementation_engineer",
        role_title: "Senior Implementation Engineer",
        goal: "Create production-ready code and comprehensive project deliverables",
        backstory: "You are a senior software engineer with expertise in multiple programming languages and frameworks. You write clean, well-documented, production-ready code with comprehensive testing and deployment strategies.",
        category: RoleCategory::Development,
        domains: &[General, Web, Automation, Documents],
        capabilities: &["coding", "testing", "deployment", "documentation"],
        complexity_fit: &[Simple, Medium, Complex, Advanced],
        priority: 1,
        synergy_ids: &["solution_architect", "quality_assurance"],
    },
    ArchetypeSpec {
        id: "frontend_developer",
        role_title: "Senior Frontend Developer",
        goal: "Create modern, responsive, and user-friendly web interfaces",
        backstory: "You are a frontend expert with deep knowledge of modern JavaScript frameworks, CSS, and UX/UI principles. You create beautiful, accessible, and performant web applications.",
        category: RoleCategory::Development,
        domains: &[Web],
        capabilities: &["frontend", "ui_ux", "responsive_design", "javascript"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 1,
        synergy_ids: &["backend_developer", "ui_ux_designer"],
    },
    ArchetypeSpec {
        id: "backend_developer",
        role_title: "Senior Backend Developer",
        goal: "Build robust, scalable, and secure backend systems and APIs",
        backstory: "You are a backend expert specializing in server-side development, database design, API development, and system integration. You ensure high performance and security.",
        category: RoleCategory::Development,
        domains: &[Web, Commerce],
        capabilities: &["backend", "api_design", "database", "security"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 1,
        synergy_ids: &["frontend_developer", "database_specialist"],
    },
    ArchetypeSpec {
        id: "ui_ux_designer",
        role_title: "UI/UX Design Specialist",
        goal: "Design intuitive and engaging user experiences",
        backstory: "You are a design expert with deep understanding of user psychology, design principles, and modern design trends. You create user-centered designs that are both beautiful and functional.",
        category: RoleCategory::Design,
        domains: &[Web, Mobile],
        capabilities: &["design", "user_experience", "prototyping", "usability"],
        complexity_fit: &[Medium, Complex],
        priority: 2,
        synergy_ids: &["frontend_developer"],
    },
    ArchetypeSpec {
        id: "data_scientist",
        role_title: "Senior Data Scientist",
        goal: "Extract insights from data using advanced analytics and machine learning",
        backstory: "You are a data science expert with deep knowledge of statistics, machine learning, and data visualization. You transform raw data into actionable business insights.",
        category: RoleCategory::Data,
        domains: &[Data],
        capabilities: &["machine_learning", "statistics", "data_mining", "predictive_modeling"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 1,
        synergy_ids: &["data_engineer", "visualization_specialist"],
    },
    ArchetypeSpec {
        id: "data_engineer",
        role_title: "Senior Data Engineer",
        goal: "Build robust data pipelines and infrastructure for data processing",
        backstory: "You are a data engineering expert specializing in ETL processes, data warehousing, and big data technologies. You ensure data quality and accessibility.",
        category: RoleCategory::Data,
        domains: &[Data],
        capabilities: &["data_pipeline", "etl", "big_data", "data_quality"],
        complexity_fit: &[Complex, Advanced],
        priority: 2,
        synergy_ids: &["data_scientist", "database_specialist"],
    },
    ArchetypeSpec {
        id: "visualization_specialist",
        role_title: "Data Visualization Specialist",
        goal: "Create compelling and insightful data visualizations",
        backstory: "You are a visualization expert who transforms complex data into clear, engaging charts and dashboards. You understand how to communicate data stories effectively.",
        category: RoleCategory::Design,
        domains: &[Data],
        capabilities: &["data_visualization", "dashboard_design", "storytelling"],
        complexity_fit: &[Simple, Medium, Complex],
        priority: 2,
        synergy_ids: &["data_scientist"],
    },
    ArchetypeSpec {
        id: "content_strategist",
        role_title: "Content Strategy Expert",
        goal: "Develop comprehensive content strategies and editorial guidelines",
        backstory: "You are a content strategy expert with deep understanding of audience needs, content marketing, and editorial best practices. You create content that engages and converts.",
        category: RoleCategory::Content,
        domains: &[Content],
        capabilities: &["content_strategy", "editorial", "audience_analysis"],
        complexity_fit: &[Medium, Complex],
        priority: 1,
        synergy_ids: &["content_creator", "seo_specialist"],
    },
    ArchetypeSpec {
        id: "content_creator",
        role_title: "Professional Content Creator",
        goal: "Create high-quality, engaging content across various formats",
        backstory: "You are a professional writer and content creator with expertise in various content formats. You create compelling, well-researched content that resonates with target audiences.",
        category: RoleCategory::Content,
        domains: &[Content],
        capabilities: &["writing", "content_creation", "research", "editing"],
        complexity_fit: &[Simple, Medium, Complex],
        priority: 1,
        synergy_ids: &["content_strategist", "seo_specialist"],
    },
    ArchetypeSpec {
        id: "seo_specialist",
        role_title: "SEO and Digital Marketing Expert",
        goal: "Optimize content for search engines and digital marketing performance",
        backstory: "You are an SEO expert with deep knowledge of search engine algorithms, keyword research, and digital marketing strategies. You ensure content performs well in search results.",
        category: RoleCategory::Content,
        domains: &[Content, Web],
        capabilities: &["seo", "keyword_research", "digital_marketing"],
        complexity_fit: &[Medium, Complex],
        priority: 2,
        synergy_ids: &["content_creator", "content_strategist"],
    },
    ArchetypeSpec {
        id: "automation_specialist",
        role_title: "Process Automation Expert",
        goal: "Design and implement efficient automation solutions",
        backstory: "You are an automation expert with deep knowledge of workflow optimization, scripting, and process automation tools. You streamline repetitive tasks and improve efficiency.",
        category: RoleCategory::Automation,
        domains: &[Automation],
        capabilities: &["process_automation", "workflow_design", "scripting"],
        complexity_fit: &[Simple, Medium, Complex],
        priority: 1,
        synergy_ids: &["implementation_engineer", "integration_specialist"],
    },
    ArchetypeSpec {
        id: "web_scraper",
        role_title: "Web Scraping Specialist",
        goal: "Extract and process data from websites efficiently and ethically",
        backstory: "You are a web scraping expert with deep knowledge of web technologies, data extraction techniques, and ethical scraping practices. You handle complex scraping challenges.",
        category: RoleCategory::Automation,
        domains: &[Automation, Data],
        capabilities: &["web_scraping", "data_extraction", "parsing"],
        complexity_fit: &[Medium, Complex],
        priority: 2,
        synergy_ids: &["automation_specialist", "data_engineer"],
    },
    ArchetypeSpec {
        id: "integration_specialist",
        role_title: "System Integration Expert",
        goal: "Integrate multiple systems and APIs seamlessly",
        backstory: "You are an integration expert specializing in connecting different systems, APIs, and services. You ensure smooth data flow and system interoperability.",
        category: RoleCategory::Automation,
        domains: &[Automation, Web, Commerce],
        capabilities: &["api_integration", "system_integration", "middleware"],
        complexity_fit: &[Complex, Advanced],
        priority: 2,
        synergy_ids: &["backend_developer", "automation_specialist"],
    },
    ArchetypeSpec {
        id: "document_parser",
        role_title: "Document Processing Expert",
        goal: "Parse and extract information from various document formats",
        backstory: "You are a document processing expert with deep knowledge of file formats, text extraction, and OCR technologies. You handle complex document parsing challenges.",
        category: RoleCategory::Document,
        domains: &[Documents],
        capabilities: &["document_parsing", "text_extraction", "ocr", "format_conversion"],
        complexity_fit: &[Simple, Medium, Complex],
        priority: 1,
        synergy_ids: &["information_extractor", "data_validator"],
    },
    ArchetypeSpec {
        id: "information_extractor",
        role_title: "Information Extraction Specialist",
        goal: "Extract structured information from unstructured text using NLP",
        backstory: "You are an NLP expert specializing in information extraction, named entity recognition, and text analysis. You transform unstructured text into structured data.",
        category: RoleCategory::Document,
        domains: &[Documents, Data],
        capabilities: &["nlp", "information_extraction", "entity_recognition"],
        complexity_fit: &[Medium, Complex],
        priority: 1,
        synergy_ids: &["document_parser", "data_validator"],
    },
    ArchetypeSpec {
        id: "data_validator",
        role_title: "Data Quality Assurance Expert",
        goal: "Ensure data accuracy, completeness, and consistency",
        backstory: "You are a data quality expert specializing in validation frameworks, data cleansing, and quality metrics. You ensure high-quality data outputs.",
        category: RoleCategory::Document,
        domains: &[Documents, Data],
        capabilities: &["data_validation", "quality_assurance", "data_cleansing"],
        complexity_fit: &[Simple, Medium, Complex],
        priority: 2,
        synergy_ids: &["information_extractor", "data_engineer"],
    },
    ArchetypeSpec {
        id: "quality_assurance",
        role_title: "Quality Assurance Specialist",
        goal: "Ensure high-quality deliverables through systematic testing and validation",
        backstory: "You are a QA expert with deep knowledge of testing methodologies, quality standards, and validation processes. You ensure deliverables meet the highest quality standards.",
        category: RoleCategory::Quality,
        domains: &[General],
        capabilities: &["testing", "quality_control", "validation", "debugging"],
        complexity_fit: &[Medium, Complex, Advanced],
        priority: 2,
        synergy_ids: &["implementation_engineer"],
    },
    ArchetypeSpec {
        id: "database_specialist",
        role_title: "Database Architecture Expert",
        goal: "Design and optimize database systems for performance and scalability",
        backstory: "You are a database expert with deep knowledge of relational and NoSQL databases, optimization techniques, and data modeling. You ensure efficient data storage and retrieval.",
        category: RoleCategory::Data,
        domains: &[Web, Data, Commerce],
        capabilities: &["database_design", "query_optimization", "data_modeling"],
        complexity_fit: &[Complex, Advanced],
        priority: 2,
        synergy_ids: &["backend_developer", "data_engineer"],
    },
];

type Team = &'static [&'static str];

const BUILTIN_TEMPLATES: &[(DomainTag, &[Team])] = &[
    (
        Web,
        &[
            &["requirements_analyst", "frontend_developer", "backend_developer", "database_specialist"],
            &["technology_researcher", "frontend_developer", "backend_developer", "quality_assurance"],
            &[
                "solution_architect",
                "frontend_developer",
                "backend_developer",
                "ui_ux_designer",
                "database_specialist",
            ],
        ],
    ),
    (
        Data,
        &[
            &["requirements_analyst", "data_scientist", "visualization_specialist"],
            &["data_scientist", "data_engineer", "visualization_specialist", "quality_assurance"],
            &[
                "requirements_analyst",
                "data_scientist",
                "data_engineer",
                "visualization_specialist",
                "database_specialist",
            ],
        ],
    ),
    (
        Content,
        &[
            &["content_strategist", "content_creator", "seo_specialist"],
            &["technology_researcher", "content_strategist", "content_creator", "seo_specialist"],
            &[
                "requirements_analyst",
                "content_strategist",
                "content_creator",
                "seo_specialist",
                "automation_specialist",
            ],
        ],
    ),
    (
        Automation,
        &[
            &["automation_specialist", "web_scraper", "implementation_engineer"],
            &["requirements_analyst", "automation_specialist", "web_scraper", "integration_specialist"],
            &[
                "automation_specialist",
                "web_scraper",
                "integration_specialist",
                "quality_assurance",
                "implementation_engineer",
            ],
        ],
    ),
    (
        Documents,
        &[
            &["document_parser", "information_extractor", "data_validator"],
            &["requirements_analyst", "document_parser", "information_extractor", "data_validator"],
            &[
                "document_parser",
                "information_extractor",
                "data_validator",
                "implementation_engineer",
                "quality_assurance",
            ],
        ],
    ),
    (
        Commerce,
        &[
            &["requirements_analyst", "backend_developer", "frontend_developer", "database_specialist"],
            &[
                "solution_architect",
                "backend_developer",
                "frontend_developer",
                "integration_specialist",
                "database_specialist",
            ],
        ],
    ),
    (
        General,
        &[
            &["requirements_analyst", "technology_researcher", "implementation_engineer"],
            &["requirements_analyst", "solution_architect", "implementation_engineer", "quality_assurance"],
        ],
    ),
];

const BUILTIN_SYNERGY_GROUPS: &[(&str, Team)] = &[
    ("data_pipeline", &["data_scientist", "data_engineer", "database_specialist"]),
    ("web_fullstack", &["frontend_developer", "backend_developer", "database_specialist"]),
    ("content_optimization", &["content_strategist", "content_creator", "seo_specialist"]),
    ("document_processing", &["document_parser", "information_extractor", "data_validator"]),
    ("automation_pipeline", &["automation_specialist", "web_scraper", "integration_specialist"]),
    (
        "enterprise_web",
        &[
            "requirements_analyst",
            "solution_architect",
            "backend_developer",
            "frontend_developer",
            "database_specialist",
        ],
    ),
    ("research_content", &["technology_researcher", "content_strategist", "content_creator"]),
];

const BUILTIN_FALLBACK_ORDER: Team = &[
    "requirements_analyst",
    "technology_researcher",
    "implementation_engineer",
    "solution_architect",
    "quality_assurance",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_21_unique_archetypes() {
        let catalog = AgentCatalog::builtin();
        assert_eq!(catalog.len(), 21);
        let rebuilt = AgentCatalog::new(
            catalog.archetypes().to_vec(),
            BTreeMap::new(),
            Vec::new(),
            Vec::new(),
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn builtin_references_resolve() {
        let catalog = AgentCatalog::builtin();
        for a in catalog.archetypes() {
            for s in &a.synergy_ids {
                assert!(catalog.get(s).is_some(), "{} -> {s}", a.id);
            }
            assert!(!a.complexity_fit.is_empty());
        }
        for domain in DomainTag::ALL {
            for team in catalog.templates_for(domain) {
                assert!(team.iter().all(|id| catalog.get(id).is_some()));
            }
        }
        for (_, group) in catalog.synergy_groups() {
            assert!(group.iter().all(|id| catalog.get(id).is_some()));
        }
        assert!(catalog.fallback_order().iter().all(|id| catalog.get(id).is_some()));
    }

    #[test]
    fn domains_without_templates_use_general_ones() {
        let catalog = AgentCatalog::builtin();
        assert_eq!(catalog.templates_for(Mobile), catalog.templates_for(General));
        assert_eq!(catalog.templates_for(DomainTag::Game).len(), 2);
        assert_eq!(catalog.templates_for(Web).len(), 3);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = AgentCatalog::builtin().archetypes()[0].clone();
        let err = AgentCatalog::from_archetypes(vec![a.clone(), a]).unwrap_err();
        assert!(matches!(err, CrewplanError::Config(_)));
    }

    #[test]
    fn empty_catalog_has_no_templates() {
        let catalog = AgentCatalog::from_archetypes(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.templates_for(Web).is_empty());
    }
}
