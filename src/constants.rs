//! Application constants
//!
//! Centralized location for status strings, endpoint paths and defaults.

use crate::models::{ContactDetail, SocialLink};

/// Path appended to the selected backend base URL
pub const CONTACT_PATH: &str = "/api/contact";

/// Default base URL of the Node.js backend
pub const DEFAULT_NODE_URL: &str = "http://localhost:5002";

/// Default base URL of the Python backend
pub const DEFAULT_PYTHON_URL: &str = "http://localhost:8000";

/// Hard limit for a single submission
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// How long an outcome stays on screen before the status clears
pub const DEFAULT_STATUS_TTL_MS: u64 = 6_000;

pub const STATUS_SENDING: &str = "Sending...";
pub const STATUS_SENT: &str = "Message sent! We'll reply within 24 hours.";
pub const STATUS_TIMED_OUT: &str = "Request timed out. Please try again.";
pub const STATUS_NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

/// Substituted for a response body that could not be read or parsed
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from server.";

/// Application name
pub const APP_NAME: &str = "Contact Us";

/// Log file written next to the working directory
pub const LOG_FILE: &str = "contact-tui.log";

pub const CONTACT_DETAILS: &[ContactDetail] = &[
    ContactDetail {
        label: "Email",
        value: "tharramzan.ofi@gmail.com",
    },
    ContactDetail {
        label: "Global Presence",
        value: "Worldwide Community",
    },
    ContactDetail {
        label: "Response Time",
        value: "Within 24 hours",
    },
];

pub const SOCIAL_LINKS: &[SocialLink] = &[
    SocialLink {
        name: "GitHub",
        url: "https://github.com/Open-Source-Kashmir/osk",
        caption: "Contribute to our projects",
    },
    SocialLink {
        name: "Discord",
        url: "https://discord.com/invite/hgnUsqAmMT",
        caption: "Join our community",
    },
    SocialLink {
        name: "YouTube",
        url: "https://youtube.com/",
        caption: "Tutorials & talks",
    },
    SocialLink {
        name: "Instagram",
        url: "https://instagram.com/",
        caption: "Community highlights",
    },
];
