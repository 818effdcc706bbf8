//! About page. Static copy, two columns.

use dioxus::prelude::*;

const ABOUT_CSS: Asset = asset!("/assets/styling/about.css");

#[component]
pub fn About() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ABOUT_CSS }
        main { class: "about-page",
            div { class: "about-left",
                h1 { class: "about-heading", "About Me" }

                div { class: "about-body",
                    p {
                        "I’ve spent the better part of "
                        span { class: "about-gold", "five years" }
                        " building software - starting as a developer, growing into product "
                        "management, and finding my stride somewhere in between. Most PMs hand "
                        "off specs and wait. I prototype in code. That overlap between vision "
                        "and execution is where I do my best work, and it’s what makes me "
                        "useful on both sides of the table."
                    }
                    p {
                        "I studied computer science, but what I really learned was how to see. "
                        "I’m the person on the team who notices the transition that feels a "
                        "frame too slow, the typography that’s a half-step off, the layout "
                        "that works but doesn’t quite land. That "
                        span { class: "about-gold", "last ten percent" }
                        " - the gap between something that functions and something that feels "
                        "right - is where I live."
                    }
                    p {
                        "I think we’re in a moment where anyone can ship a product, but very "
                        "few people can make one that someone actually wants to come back to. "
                        "AI can build the thing. It can’t tell you why the thing feels off. "
                        "That sensitivity - knowing when to add and when to hold back - is "
                        "what I bring to the work."
                    }
                    p {
                        "When I’m not building, I’m probably eating something I spent too "
                        "long finding on Google Maps, rewatching Ratatouille for the hundredth "
                        "time, snowboarding, taking photos, or hanging out with friends who’d "
                        "reluctantly admit I’m the best-dressed one there."
                    }
                    p {
                        span { class: "about-gold",
                            "Good work comes from people who notice things"
                        }
                        " - good food, good films, good fits. That sensibility shows up in "
                        "everything I make."
                    }
                }
            }

            div { class: "about-right",
                div { class: "about-image-placeholder" }
            }
        }
    }
}
