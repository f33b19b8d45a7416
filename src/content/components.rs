//! Style rules and scripts registered by compiled pages.
//!
//! Registration keys double as bundle/stylesheet section names, so each
//! component is emitted once per site no matter how many pages use it.

use crate::config::NavConfig;
use crate::nav::{FADE_IN_DELAY, NAVIGATION, NAVIGATION_START, SWAP_DELAY, TOC_COLLAPSE_WIDTH};

pub const LAYOUT_STYLE: &str = "layout";
pub const CODE_STYLE: &str = "code";
pub const COPY_CODE_SCRIPT: &str = "copy-code";
pub const SOFT_NAV_SCRIPT: &str = "soft-nav";

/// Base page layout: ToC on the left, content on the right, ToC collapsed
/// below 1200px.
pub fn layout_css(nav: &NavConfig) -> String {
    let toc = &nav.toc;
    let container = &nav.container;
    format!(
        r#"body {{ margin: 0; font-family: system-ui, sans-serif; line-height: 1.6; }}
#{toc} {{ position: fixed; top: 0; left: 0; bottom: 0; width: 280px; overflow-y: auto; padding: 1rem; box-sizing: border-box; border-right: 1px solid #e5e5e5; }}
#{toc}.collapsed {{ display: none; }}
#{container} {{ margin-left: 280px; padding: 2rem; max-width: 860px; opacity: 1; transition: opacity .15s; }}
@media (max-width: 1200px) {{
  #{toc} {{ position: static; width: auto; border-right: none; }}
  #{container} {{ margin-left: 0; }}
}}"#
    )
}

pub const CODE_CSS: &str = r#"pre { position: relative; padding: 1rem; overflow-x: auto; border-radius: 6px; background: #f6f8fa; }
pre > .copy-code { position: absolute; top: .5rem; right: .5rem; font-size: .75rem; cursor: pointer; opacity: .6; }
pre:hover > .copy-code { opacity: 1; }"#;

pub const COPY_CODE_JS: &str = r#"(function () {
  function enhance() {
    var blocks = document.querySelectorAll('pre > code');
    for (var i = 0; i < blocks.length; i++) {
      var pre = blocks[i].parentNode;
      if (pre.querySelector('.copy-code')) continue;
      var button = document.createElement('button');
      button.className = 'copy-code';
      button.textContent = 'copy';
      button.addEventListener('click', (function (code) {
        return function () { navigator.clipboard.writeText(code.textContent); };
      })(blocks[i]));
      pre.appendChild(button);
    }
  }
  window.addEventListener('DOMContentLoaded', enhance);
  window.addEventListener('navigation', enhance);
})();"#;

/// Browser side of [`crate::nav::Navigator`], registered on every page.
///
/// Keeps the navigator's transitions and timings. A newer navigation turns
/// pending fetches and timers into no-ops.
const SOFT_NAV_TEMPLATE: &str = r#"(function () {
  if (window.folioSoftNavAttached) return;
  window.folioSoftNavAttached = true;

  var generation = 0;
  var ua = navigator.userAgent.toLowerCase();
  var safari = ua.indexOf('safari');
  function before(token) {
    var at = ua.indexOf(token);
    return at >= 0 && at < safari;
  }
  var reloadOnPop = safari >= 0 && !before('chrome') && !before('android');

  function emit(name, url) {
    window.dispatchEvent(new CustomEvent(name, { detail: { url: url } }));
  }

  function inSite(href) {
    return href.charAt(0) === '/' && href.charAt(1) !== '/';
  }

  function navigate(url, push) {
    var container = document.getElementById('__CONTAINER__');
    if (!container) {
      window.location.href = url;
      return;
    }
    if (window.innerWidth <= __TOC_WIDTH__) {
      var toc = document.getElementById('__TOC__');
      if (toc) toc.classList.add('collapsed');
    }
    if (push && window.location.pathname === url) return;

    var current = ++generation;
    container.style.opacity = '0';
    if (push) history.pushState(url, '', url);
    emit('__NAVIGATION_START__', url);

    fetch(url)
      .then(function (res) { return res.text(); })
      .then(function (html) {
        if (current !== generation) return;
        var dom = new DOMParser().parseFromString(html, 'text/html');
        var title = dom.querySelector('title');
        if (title) document.title = title.textContent;
        setTimeout(function () {
          if (current !== generation) return;
          var fetched = dom.getElementById('__CONTAINER__');
          container.innerHTML = fetched ? fetched.innerHTML : '';
          var scripts = container.querySelectorAll('script');
          for (var i = 0; i < scripts.length; i++) {
            if (!scripts[i].src) (0, eval)(scripts[i].textContent || '');
          }
          setTimeout(function () {
            if (current !== generation) return;
            container.style.opacity = '1';
            emit('__NAVIGATION__', url);
          }, __FADE_IN__);
        }, __SWAP__);
      })
      .catch(function () {});
  }

  document.addEventListener('click', function (event) {
    var el = event.target;
    while (el && !(el.hasAttribute && el.hasAttribute('href'))) el = el.parentNode;
    if (!el) return;
    var href = el.getAttribute('href');
    if (!inSite(href)) return;
    event.preventDefault();
    navigate(href, true);
  });

  window.addEventListener('popstate', function (event) {
    var url = event.state || '/';
    if (reloadOnPop) window.location.href = url;
    else navigate(url, false);
  });
})();"#;

/// Soft navigation client for the configured container and ToC ids.
pub fn soft_nav_js(nav: &NavConfig) -> String {
    SOFT_NAV_TEMPLATE
        .replace("__CONTAINER__", &nav.container)
        .replace("__TOC__", &nav.toc)
        .replace("__TOC_WIDTH__", &TOC_COLLAPSE_WIDTH.to_string())
        .replace("__NAVIGATION_START__", NAVIGATION_START)
        .replace("__NAVIGATION__", NAVIGATION)
        .replace("__SWAP__", &SWAP_DELAY.as_millis().to_string())
        .replace("__FADE_IN__", &FADE_IN_DELAY.as_millis().to_string())
}
