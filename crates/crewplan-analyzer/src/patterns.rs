// SPDX-FileCopyrightText: 2026 Crewplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static term tables driving requirement analysis.
//!
//! Every term is lowercase. Input text is lowercased before matching.

use crewplan_core::{Complexity, DomainTag};

/// Keyword and indicator terms for one scored domain.
pub struct DomainPattern {
    pub domain: DomainTag,
    /// Each hit adds 1.0 to the domain score.
    pub keywords: &'static [&'static str],
    /// Each hit adds 0.5 to the domain score.
    pub indicators: &'static [&'static str],
}

/// Scored domains in declaration order. `General` is never scored.
pub const DOMAIN_PATTERNS: &[DomainPattern] = &[
    DomainPattern {
        domain: DomainTag::Web,
        keywords: &[
            "웹사이트", "웹앱", "웹개발", "html", "css", "javascript", "react", "vue", "angular",
            "홈페이지", "포털", "온라인", "api", "backend", "frontend", "rest",
        ],
        indicators: &["사용자 인터페이스", "ui", "ux", "반응형", "브라우저"],
    },
    DomainPattern {
        domain: DomainTag::Data,
        keywords: &[
            "데이터", "분석", "통계", "머신러닝", "ml", "ai", "예측", "모델링", "시각화", "차트",
            "그래프", "리포트", "대시보드", "bi",
        ],
        indicators: &["패턴", "트렌드", "인사이트", "예측 모델", "데이터 마이닝"],
    },
    DomainPattern {
        domain: DomainTag::Content,
        keywords: &[
            "블로그", "콘텐츠", "글", "작성", "포스팅", "seo", "소셜미디어", "카피라이팅", "마케팅",
            "광고", "브랜딩",
        ],
        indicators: &["주제", "키워드", "검색엔진", "조회수", "트래픽"],
    },
    DomainPattern {
        domain: DomainTag::Automation,
        keywords: &[
            "자동화", "스크립트", "배치", "스케줄", "크롤링", "스크래핑", "봇", "매크로", "rpa",
            "프로세스", "업무",
        ],
        indicators: &["반복", "일정", "자동 실행", "효율성", "생산성"],
    },
    DomainPattern {
        domain: DomainTag::Mobile,
        keywords: &[
            "모바일", "앱", "ios", "android", "스마트폰", "태블릿", "flutter", "react native",
            "앱스토어", "플레이스토어",
        ],
        indicators: &["모바일 기기", "터치", "푸시 알림", "오프라인"],
    },
    DomainPattern {
        domain: DomainTag::Documents,
        keywords: &[
            "문서", "파일", "pdf", "excel", "word", "이력서", "파싱", "추출", "변환", "ocr", "스캔",
        ],
        indicators: &["형식 변환", "정보 추출", "구조화", "표준화"],
    },
    DomainPattern {
        domain: DomainTag::Commerce,
        keywords: &[
            "쇼핑몰", "이커머스", "온라인쇼핑", "결제", "주문", "배송", "상품", "카트", "결제시스템",
            "재고",
        ],
        indicators: &["판매", "구매", "거래", "상거래", "수익"],
    },
    DomainPattern {
        domain: DomainTag::Game,
        keywords: &[
            "게임", "플레이어", "스코어", "레벨", "캐릭터", "아이템", "unity", "unreal", "3d", "2d",
            "그래픽",
        ],
        indicators: &["게임플레이", "인터랙션", "엔터테인먼트", "재미"],
    },
];

/// A technology category detected from trigger terms.
pub struct TechPattern {
    /// Label added to the tech stack when any trigger matches.
    pub label: &'static str,
    pub triggers: &'static [&'static str],
    pub libraries: &'static [&'static str],
}

pub const TECH_PATTERNS: &[TechPattern] = &[
    TechPattern {
        label: "Web Frameworks",
        triggers: &["flask", "django", "fastapi", "express", "node", "react", "vue", "angular"],
        libraries: &["requests", "beautifulsoup4", "selenium", "flask", "django", "fastapi"],
    },
    TechPattern {
        label: "Data Science",
        triggers: &[
            "pandas", "numpy", "matplotlib", "seaborn", "plotly", "scikit-learn", "tensorflow",
        ],
        libraries: &["pandas", "numpy", "matplotlib", "seaborn", "scikit-learn", "jupyter"],
    },
    TechPattern {
        label: "NLP Text",
        triggers: &["텍스트", "자연어", "nlp", "언어모델", "챗봇", "번역", "요약"],
        libraries: &["transformers", "openai", "langchain", "nltk", "spacy", "konlpy"],
    },
    TechPattern {
        label: "Web Scraping",
        triggers: &["크롤링", "스크래핑", "수집", "파싱", "웹사이트"],
        libraries: &["requests", "beautifulsoup4", "selenium", "scrapy", "lxml"],
    },
    TechPattern {
        label: "Database",
        triggers: &["데이터베이스", "db", "sql", "저장", "조회", "관리"],
        libraries: &["sqlalchemy", "psycopg2", "sqlite3", "pymongo", "redis"],
    },
    TechPattern {
        label: "API Integration",
        triggers: &["api", "연동", "통합", "외부서비스", "rest", "graphql"],
        libraries: &["requests", "httpx", "aiohttp", "fastapi", "flask-restful"],
    },
];

/// Libraries every generated project needs.
pub const BASE_LIBRARIES: &[&str] = &["crewai", "python-dotenv", "langchain-litellm"];

/// Default tech stack for a primary domain.
pub fn domain_stack(domain: DomainTag) -> &'static [&'static str] {
    match domain {
        DomainTag::Web => &["Python", "Flask/FastAPI", "HTML/CSS", "JavaScript"],
        DomainTag::Data => &["Python", "Pandas", "NumPy", "Matplotlib"],
        DomainTag::Content => &["Python", "NLP Libraries", "Web APIs"],
        DomainTag::Automation => &["Python", "Selenium", "Requests", "Schedule"],
        DomainTag::Mobile => &["Flutter", "React Native", "Native Development"],
        DomainTag::Documents => &["Python", "PyPDF2", "openpyxl", "docx"],
        DomainTag::Commerce => &["Python", "Flask/Django", "Payment APIs", "Database"],
        DomainTag::Game => &["Unity", "C#", "Python", "Game Engines"],
        DomainTag::General => &["Python"],
    }
}

/// Default libraries for a primary domain.
pub fn domain_libraries(domain: DomainTag) -> &'static [&'static str] {
    match domain {
        DomainTag::Web => &["flask", "requests", "jinja2"],
        DomainTag::Data => &["pandas", "numpy", "matplotlib"],
        DomainTag::Content => &["openai", "requests", "beautifulsoup4"],
        DomainTag::Automation => &["selenium", "schedule", "requests"],
        DomainTag::Documents => &["PyPDF2", "openpyxl", "python-docx"],
        DomainTag::Mobile | DomainTag::Commerce | DomainTag::Game | DomainTag::General => &[],
    }
}

/// A library named directly in the request, possibly by an alias.
pub struct LibraryAlias {
    pub token: &'static str,
    pub library: &'static str,
    /// Stack label implied by the mention, if any.
    pub stack: Option<&'static str>,
}

pub const LIBRARY_ALIASES: &[LibraryAlias] = &[
    LibraryAlias { token: "pandas", library: "pandas", stack: Some("Pandas") },
    LibraryAlias { token: "numpy", library: "numpy", stack: Some("NumPy") },
    LibraryAlias { token: "flask", library: "flask", stack: Some("Flask") },
    LibraryAlias { token: "django", library: "django", stack: Some("Django") },
    LibraryAlias { token: "fastapi", library: "fastapi", stack: Some("FastAPI") },
    LibraryAlias { token: "selenium", library: "selenium", stack: Some("Selenium") },
    LibraryAlias { token: "requests", library: "requests", stack: None },
    LibraryAlias { token: "beautifulsoup4", library: "beautifulsoup4", stack: None },
    LibraryAlias { token: "beautifulsoup", library: "beautifulsoup4", stack: None },
    LibraryAlias { token: "bs4", library: "beautifulsoup4", stack: None },
    LibraryAlias { token: "openai", library: "openai", stack: Some("OpenAI API") },
    LibraryAlias { token: "sklearn", library: "scikit-learn", stack: Some("scikit-learn") },
    LibraryAlias { token: "scikit", library: "scikit-learn", stack: Some("scikit-learn") },
    LibraryAlias { token: "tensorflow", library: "tensorflow", stack: Some("TensorFlow") },
    LibraryAlias { token: "pytorch", library: "torch", stack: Some("PyTorch") },
    LibraryAlias { token: "torch", library: "torch", stack: Some("PyTorch") },
];

/// Indicator and anti-indicator phrases for one complexity tier.
pub struct ComplexityPattern {
    pub complexity: Complexity,
    /// Each hit adds 1 to the tier.
    pub indicators: &'static [&'static str],
    /// Each hit subtracts 1 from the tier.
    pub anti_indicators: &'static [&'static str],
}

pub const COMPLEXITY_PATTERNS: &[ComplexityPattern] = &[
    ComplexityPattern {
        complexity: Complexity::Simple,
        indicators: &["간단한", "기본적인", "단순한", "빠른", "최소한의"],
        anti_indicators: &["복잡한", "고도화", "대용량", "다중", "통합", "머신러닝", "실시간"],
    },
    ComplexityPattern {
        complexity: Complexity::Medium,
        indicators: &["일반적인", "표준적인", "기본 기능", "일부 기능"],
        anti_indicators: &["매우 복잡한", "엔터프라이즈급", "대규모"],
    },
    ComplexityPattern {
        complexity: Complexity::Complex,
        indicators: &[
            "다양한", "여러", "통합", "고급", "다중", "포괄적인", "머신러닝", "대용량", "실시간",
        ],
        anti_indicators: &["매우 단순한", "기본만"],
    },
    ComplexityPattern {
        complexity: Complexity::Advanced,
        indicators: &["엔터프라이즈", "대규모", "고도화", "전문적인", "완전한", "포괄적인", "대용량"],
        anti_indicators: &[],
    },
];

/// Nouns that each suggest one more feature in the request.
pub const FEATURE_NOUNS: &[&str] = &["기능", "모듈", "시스템", "서비스", "처리", "관리", "분석", "생성"];

/// Words dropped during keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "을", "를", "이", "가", "은", "는", "에", "에서", "로", "으로", "와", "과", "의", "도", "만",
    "까지", "부터", "하고", "하는", "한", "할", "해",
];

/// Complexity-factor labels and the phrases that trigger them.
pub const COMPLEXITY_FACTORS: &[(&[&str], &str)] = &[
    (&["다양한", "여러"], "multiple features requested"),
    (&["통합", "연동"], "system integration required"),
    (&["자동화"], "automation process"),
    (&["분석"], "includes data analysis"),
];

/// Word count above which a request counts as detailed.
pub const DETAILED_WORD_COUNT: usize = 30;
