use crate::category::Category;
use error_chain::error_chain;

error_chain! {
    foreign_links {
        Io(std::io::Error);
        HttpRequest(reqwest::Error);
        Url(url::ParseError);
    }

    errors {
        UnknownCategory(name: String) {
            description("unknown category")
            display("filetype {} is undefined (expected datasets or pretrained_models)", name)
        }
        KeyNotFound(category: Category, key: String) {
            description("key not present in listing")
            display("{} is not listed under {}", key, category)
        }
    }
}
