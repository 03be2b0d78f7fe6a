//! JavaScript fragments executed through the driver.
//!
//! Each script runs inside the function body WebDriver wraps around it, so
//! `return` and local `const` bindings are safe across repeated execution.
//! Elements and other values always travel through `arguments[n]`, never by
//! interpolation into the source.

/// Dispatches a synthetic DOM event on `arguments[0]` named by `arguments[1]`.
/// Mouse-family events get a `MouseEvent` so listeners reading coordinates or
/// buttons see a well-formed object.
pub(crate) const SIMULATE_EVENT: &str = r#"
    const simulate = function (element, eventName) {
        const mouseEvents = ['click', 'dblclick', 'mousedown', 'mouseup',
                             'mouseover', 'mouseout', 'mousemove', 'contextmenu'];
        let event;
        if (mouseEvents.includes(eventName)) {
            event = new MouseEvent(eventName, { bubbles: true, cancelable: true, view: window });
        } else {
            event = new Event(eventName, { bubbles: true, cancelable: true });
        }
        element.dispatchEvent(event);
    };
    simulate(arguments[0], arguments[1]);
"#;

pub(crate) const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView();";

pub(crate) const JS_CLICK: &str = "arguments[0].click();";

/// Submits the form enclosing `arguments[0]`. Throws if the element is not
/// inside a form, which surfaces as a driver command error.
pub(crate) const SUBMIT_ENCLOSING_FORM: &str = r#"
    const form = arguments[0].closest('form');
    if (form === null) {
        throw new Error('element is not inside a form');
    }
    if (typeof form.requestSubmit === 'function') {
        form.requestSubmit();
    } else {
        form.submit();
    }
"#;

/// Forces `arguments[0]` into a displayed state: block display, and a
/// `type="hidden"` attribute is blanked so hidden inputs become visible too.
pub(crate) const MAKE_VISIBLE: &str = r#"
    arguments[0].style.display = 'block';
    if (arguments[0].getAttribute('type') === 'hidden') {
        arguments[0].setAttribute('type', '');
    }
"#;

/// Hit-tests the top-left viewport corner of `arguments[0]` and tags whatever
/// is on top with attribute `arguments[1]` = `arguments[2]`, so the caller can
/// re-find it through the driver. Returns whether anything was hit.
pub(crate) const MARK_ELEMENT_ABOVE: &str = r#"
    arguments[0].scrollIntoView();
    const rect = arguments[0].getBoundingClientRect();
    const above = document.elementFromPoint(rect.left, rect.top);
    if (above === null) {
        return false;
    }
    above.setAttribute(arguments[1], arguments[2]);
    return true;
"#;

pub(crate) const CLEAR_ATTRIBUTE: &str = "arguments[0].removeAttribute(arguments[1]);";

pub(crate) const OPEN_BLANK_TAB: &str = "window.open('');";
