//! Searchable product list; clicking a product analyzes it.

use leptos::prelude::*;
use session::AnalysisSession;

use crate::actions;
use crate::net::api::BrowserAnalysisClient;

#[component]
pub fn CatalogPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<AnalysisSession>>();
    let api = expect_context::<BrowserAnalysisClient>();

    let is_loading = move || session.with(AnalysisSession::is_loading);

    view! {
        <aside class="catalog">
            <input
                class="catalog__search"
                type="text"
                placeholder="Search products..."
                prop:value=move || session.with(|s| s.catalog().query().to_owned())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    session.update(|s| s.catalog_mut().set_query(query));
                }
            />
            <ul class="catalog__list">
                {move || {
                    let products = session.with(|s| s.catalog().filtered().to_vec());
                    if products.is_empty() {
                        return view! { <li class="catalog__empty">"No products"</li> }.into_any();
                    }

                    products
                        .into_iter()
                        .map(|product| {
                            let label = product.name.clone();
                            let name = product.name;
                            view! {
                                <li class="catalog__item">
                                    <button
                                        class="catalog__pick"
                                        disabled=is_loading
                                        on:click=move |_| actions::analyze_product(session, api, name.clone())
                                    >
                                        {label}
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </ul>
        </aside>
    }
}
