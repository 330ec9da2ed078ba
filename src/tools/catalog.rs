//! Static tool catalog

use super::types::{ParamKind, ParamSpec, ReturnShape, ToolSpec};

const LIMIT: ParamSpec = ParamSpec {
    name: "limit",
    kind: ParamKind::Integer,
    required: false,
    description: "Maximum number of items to return",
};

const KNOWLEDGE_IDENTIFIER: ParamSpec = ParamSpec {
    name: "identifier",
    kind: ParamKind::String,
    required: true,
    description: "Id or number of the knowledge item",
};

const DOCUMENT_MAX_RESULTS: ParamSpec = ParamSpec {
    name: "max_results",
    kind: ParamKind::Integer,
    required: false,
    description: "Maximum number of documents to return",
};

/// Every tool the toolbox can dispatch
pub static CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "list_knowledge",
        description: "List TOPdesk knowledge items with title, description and content (default 5)",
        params: &[LIMIT],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "list_public_knowledge",
        description: "List only publicly visible TOPdesk knowledge items (default 5)",
        params: &[LIMIT],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "get_knowledge_by_id",
        description: "Fetch one TOPdesk knowledge item by id or number",
        params: &[KNOWLEDGE_IDENTIFIER],
        returns: ReturnShape::Record,
    },
    ToolSpec {
        name: "search_knowledge",
        description: "Free-text search over TOPdesk knowledge items (default 10)",
        params: &[
            ParamSpec {
                name: "search_term",
                kind: ParamKind::String,
                required: true,
                description: "Text to search for",
            },
            LIMIT,
        ],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "list_recent_knowledge",
        description: "List TOPdesk knowledge items with creation and modification dates (default 5)",
        params: &[LIMIT],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "list_concept_knowledge",
        description: "List TOPdesk knowledge items still in concept status (default 10)",
        params: &[LIMIT],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "get_knowledge_content",
        description: "Fetch the full content of one TOPdesk knowledge item, translations included",
        params: &[KNOWLEDGE_IDENTIFIER],
        returns: ReturnShape::Record,
    },
    ToolSpec {
        name: "list_incidents_by_caller",
        description: "List TOPdesk incidents reported by an email address, open or closed",
        params: &[
            ParamSpec {
                name: "email",
                kind: ParamKind::String,
                required: true,
                description: "Caller email address",
            },
            ParamSpec {
                name: "status",
                kind: ParamKind::String,
                required: false,
                description: "'open' (default) or 'closed'",
            },
        ],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "get_incident",
        description: "Fetch one TOPdesk incident by its number",
        params: &[ParamSpec {
            name: "number",
            kind: ParamKind::String,
            required: true,
            description: "Incident number, e.g. I 2405 001",
        }],
        returns: ReturnShape::Record,
    },
    ToolSpec {
        name: "list_documents",
        description: "List Zenya documents with id, title, type and modification date",
        params: &[DOCUMENT_MAX_RESULTS],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "search_documents",
        description: "Search Zenya documents in a portal (default 10 results)",
        params: &[
            ParamSpec {
                name: "query",
                kind: ParamKind::String,
                required: true,
                description: "Search keywords",
            },
            DOCUMENT_MAX_RESULTS,
            ParamSpec {
                name: "portal_id",
                kind: ParamKind::Integer,
                required: false,
                description: "Portal to search in; defaults to the configured portal",
            },
        ],
        returns: ReturnShape::List,
    },
    ToolSpec {
        name: "download_document",
        description: "Download a Zenya document as base64",
        params: &[ParamSpec {
            name: "document_id",
            kind: ParamKind::String,
            required: true,
            description: "Id of the document",
        }],
        returns: ReturnShape::Record,
    },
    ToolSpec {
        name: "list_content",
        description: "Fetch one raw page of Zenya portal content items (default limit 50)",
        params: &[
            ParamSpec {
                name: "limit",
                kind: ParamKind::Integer,
                required: false,
                description: "Items in the page",
            },
            ParamSpec {
                name: "offset",
                kind: ParamKind::Integer,
                required: false,
                description: "Items to skip",
            },
        ],
        returns: ReturnShape::Record,
    },
];

/// Look up a tool by name
pub fn find_tool(name: &str) -> Option<&'static ToolSpec> {
    CATALOG.iter().find(|tool| tool.name == name)
}
