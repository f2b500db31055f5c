use std::fmt::Write;

use super::state::Notice;
use super::view::{Card, DetailPanel, EditorView, GalleryView, Pagination};

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(view: &GalleryView) -> String {
    let mut html = String::new();

    let body_style = view
        .background_url
        .as_deref()
        .map(|url| format!(" style=\"background-image: url('{}')\"", escape(url)))
        .unwrap_or_default();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>SightSharing</title>\n\
         <link rel=\"stylesheet\" href=\"/css/style.css\">\n\
         </head>\n<body class=\"bg-cover bg-center\"{body_style}>\n"
    );

    let _ = write!(
        html,
        "<header class=\"flex justify-between p-4\">\
         <a class=\"font-bold text-white\" href=\"{}\">SightSharing</a>\
         <a class=\"add-button\" href=\"{}\">Add destination</a>\
         </header>\n",
        escape(&view.home_href),
        escape(&view.add_href),
    );

    if let Some(notice) = &view.notice {
        render_notice(&mut html, notice, &view.dismiss_href);
    }

    html.push_str("<section id=\"info-section\">\n");
    if let Some(detail) = &view.detail {
        render_detail(&mut html, detail);
    } else if view.show_intro {
        render_intro(&mut html, view.explore_href);
    }
    html.push_str("</section>\n");

    html.push_str("<section id=\"gallery-grid\" class=\"grid grid-cols-3 gap-4\">\n");
    for card in &view.cards {
        render_card(&mut html, card);
    }
    html.push_str("</section>\n");

    render_pagination(&mut html, &view.pagination);

    if let Some(editor) = &view.editor {
        render_editor(&mut html, editor);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_notice(html: &mut String, notice: &Notice, dismiss_href: &str) {
    let (class, text) = match notice {
        Notice::Info(text) => ("notice", text),
        Notice::Error(text) => ("notice notice-error", text),
    };
    let _ = write!(
        html,
        "<div class=\"{class}\" role=\"alert\">{} <a href=\"{}\">Dismiss</a></div>\n",
        escape(text),
        escape(dismiss_href),
    );
}

fn render_intro(html: &mut String, explore_href: &str) {
    let _ = write!(
        html,
        "<div class=\"flex flex-col h-full p-4 justify-center items-start\">\
         <h2 class=\"text-4xl font-bold text-white mb-4\">Discover and Share Your Travel Favourites</h2>\
         <p class=\"text-lg text-white mb-4\">Travellers from all over the world share their most loved \
         places here. Find inspiration for your next adventure and share your own unforgettable experiences.</p>\
         <a id=\"explore-button\" class=\"bg-blue-500 text-white font-bold py-2 px-4 rounded\" href=\"{}\">Start exploring</a>\
         </div>\n",
        escape(explore_href),
    );
}

fn render_detail(html: &mut String, detail: &DetailPanel) {
    let _ = write!(
        html,
        "<div class=\"flex flex-col h-full p-4\">\
         <h2 class=\"font-bold mb-2 text-white destination-name {}\">{}</h2>\
         <div class=\"text-xs mt-2 text-white\">Location: {}</div>\
         <p class=\"text-lg text-white mt-2\">{}</p>\
         <a class=\"text-white font-bold py-2 mt-4\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">More information</a>\
         <a id=\"edit-button\" class=\"text-white font-bold py-2\" href=\"{}\" data-id=\"{}\">Edit</a>\
         </div>\n",
        detail.title_size.class(),
        escape(&detail.name),
        escape(&detail.location),
        escape(&detail.description),
        escape(&detail.more_info_url),
        escape(&detail.edit_href),
        detail.id,
    );
}

fn render_card(html: &mut String, card: &Card) {
    let _ = write!(
        html,
        "<a class=\"card mb-4 rounded-lg shadow-lg overflow-hidden relative text-white\" href=\"{}\">\
         <div class=\"card-image bg-cover bg-center rounded-lg h-full w-full\" style=\"background-image: url('{}')\"></div>\
         <div class=\"absolute bottom-0 left-0 bg-black bg-opacity-50 p-2 w-full\"><h3 class=\"text-sm font-bold\">{}</h3></div>\
         </a>\n",
        escape(&card.href),
        escape(&card.image_url),
        escape(&card.name),
    );
}

fn render_pagination(html: &mut String, pagination: &Pagination) {
    html.push_str("<nav class=\"pagination\">");
    if pagination.show_prev {
        let _ = write!(
            html,
            "<a id=\"prev-button\" href=\"{}\">Previous</a>",
            escape(&pagination.prev_href)
        );
    }
    let _ = write!(
        html,
        "<span>Page {} of {}</span>",
        pagination.page + 1,
        pagination.page_count
    );
    if pagination.show_next {
        let _ = write!(
            html,
            "<a id=\"next-button\" href=\"{}\">Next</a>",
            escape(&pagination.next_href)
        );
    }
    html.push_str("</nav>\n");
}

fn render_editor(html: &mut String, editor: &EditorView) {
    let _ = write!(
        html,
        "<div id=\"contributionModal\" class=\"modal\">\
         <form id=\"contributionForm\" method=\"post\" enctype=\"multipart/form-data\" action=\"{}\">\
         <h2>{}</h2>\
         <label>Name <input type=\"text\" name=\"name\" value=\"{}\"></label>\
         <label>Location <input type=\"text\" name=\"location\" value=\"{}\"></label>\
         <label>Description <textarea name=\"description\">{}</textarea></label>\
         <label>Background image <input type=\"file\" name=\"backgroundImage\" accept=\"image/*\"></label>\
         <label>Gallery image <input type=\"file\" name=\"galleryImage\" accept=\"image/*\"></label>\
         <button type=\"submit\">{}</button>\
         <a href=\"{}\">Cancel</a>\
         </form>",
        escape(&editor.action),
        escape(editor.heading),
        escape(&editor.name),
        escape(&editor.location),
        escape(&editor.description),
        escape(editor.submit_label),
        escape(&editor.cancel_href),
    );

    if let Some(delete_action) = &editor.delete_action {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"{}\"><button type=\"submit\">Delete</button></form>",
            escape(delete_action)
        );
    }
    html.push_str("</div>\n");
}
